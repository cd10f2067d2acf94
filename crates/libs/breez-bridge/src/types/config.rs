use serde::{Deserialize, Serialize};

use crate::marshal::impl_request;
use crate::schema::{FieldSpec, Schema, Shape};

pub const NETWORKS: &[&str] = &["bitcoin", "testnet", "signet", "regtest"];
pub const ENVIRONMENT_TYPES: &[&str] = &["production", "staging"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Network {
    Bitcoin,
    Testnet,
    Signet,
    Regtest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentType {
    Production,
    Staging,
}

/// Client credentials for a cloud-hosted Greenlight node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreenlightCredentials {
    #[serde(with = "serde_bytes")]
    pub device_key: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub device_cert: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreenlightNodeConfig {
    pub partner_credentials: Option<GreenlightCredentials>,
    pub invite_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NodeConfig {
    Greenlight { config: GreenlightNodeConfig },
}

/// Configuration the core session is started with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub breezserver: String,
    pub mempoolspace_url: String,
    pub working_dir: String,
    pub network: Network,
    pub payment_timeout_sec: u32,
    pub default_lsp_id: Option<String>,
    pub api_key: Option<String>,
    pub maxfee_percent: f64,
    pub exemptfee_msat: u64,
    pub node_config: NodeConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub config: Config,
    #[serde(with = "serde_bytes")]
    pub seed: Vec<u8>,
    pub restore_only: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultConfigRequest {
    pub env_type: EnvironmentType,
    pub api_key: String,
    pub node_config: NodeConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MnemonicToSeedRequest {
    pub phrase: String,
}

/// Arguments of operations that take none.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyRequest {}

pub static GREENLIGHT_CREDENTIALS: Schema = Schema {
    name: "GreenlightCredentials",
    fields: &[
        FieldSpec::required("deviceKey", Shape::Bytes { min: 1, max: usize::MAX }),
        FieldSpec::required("deviceCert", Shape::Bytes { min: 1, max: usize::MAX }),
    ],
};

pub static GREENLIGHT_NODE_CONFIG: Schema = Schema {
    name: "GreenlightNodeConfig",
    fields: &[
        FieldSpec::optional("partnerCredentials", Shape::Record(&GREENLIGHT_CREDENTIALS)),
        FieldSpec::optional("inviteCode", Shape::Str),
    ],
};

static GREENLIGHT_VARIANT: Schema = Schema {
    name: "NodeConfig.greenlight",
    fields: &[FieldSpec::required("config", Shape::Record(&GREENLIGHT_NODE_CONFIG))],
};

pub static CONFIG: Schema = Schema {
    name: "Config",
    fields: &[
        FieldSpec::required("breezserver", Shape::Str),
        FieldSpec::required("mempoolspaceUrl", Shape::Str),
        FieldSpec::required("workingDir", Shape::Str),
        FieldSpec::required("network", Shape::OneOf(NETWORKS)),
        FieldSpec::required("paymentTimeoutSec", Shape::U32),
        FieldSpec::optional("defaultLspId", Shape::Str),
        FieldSpec::optional("apiKey", Shape::Str),
        FieldSpec::required("maxfeePercent", Shape::F64),
        FieldSpec::required("exemptfeeMsat", Shape::U64),
        FieldSpec::required(
            "nodeConfig",
            Shape::Union { tag: "type", variants: &[("greenlight", &GREENLIGHT_VARIANT)] },
        ),
    ],
};

pub static CONNECT_REQUEST: Schema = Schema {
    name: "ConnectRequest",
    fields: &[
        FieldSpec::required("config", Shape::Record(&CONFIG)),
        FieldSpec::required("seed", Shape::Bytes { min: 16, max: 64 }),
        FieldSpec::optional("restoreOnly", Shape::Bool),
    ],
};

pub static DEFAULT_CONFIG_REQUEST: Schema = Schema {
    name: "DefaultConfigRequest",
    fields: &[
        FieldSpec::required("envType", Shape::OneOf(ENVIRONMENT_TYPES)),
        FieldSpec::required("apiKey", Shape::Str),
        FieldSpec::required(
            "nodeConfig",
            Shape::Union { tag: "type", variants: &[("greenlight", &GREENLIGHT_VARIANT)] },
        ),
    ],
};

pub static MNEMONIC_TO_SEED_REQUEST: Schema = Schema {
    name: "MnemonicToSeedRequest",
    fields: &[FieldSpec::required("phrase", Shape::Str)],
};

pub static EMPTY_REQUEST: Schema = Schema { name: "EmptyRequest", fields: &[] };

impl_request! {
    Config => CONFIG,
    ConnectRequest => CONNECT_REQUEST,
    DefaultConfigRequest => DEFAULT_CONFIG_REQUEST,
    MnemonicToSeedRequest => MNEMONIC_TO_SEED_REQUEST,
    EmptyRequest => EMPTY_REQUEST,
}
