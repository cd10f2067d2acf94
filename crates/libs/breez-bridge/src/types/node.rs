use serde::{Deserialize, Serialize};

use crate::marshal::impl_request;
use crate::schema::{FieldSpec, Schema, Shape};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnspentTransactionOutput {
    #[serde(with = "serde_bytes")]
    pub txid: Vec<u8>,
    pub outnum: u32,
    pub amount_millisatoshi: u64,
    pub address: String,
    pub reserved: bool,
}

/// Snapshot of the node backing the session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeState {
    pub id: String,
    pub block_height: u32,
    pub channels_balance_msat: u64,
    pub onchain_balance_msat: u64,
    pub utxos: Vec<UnspentTransactionOutput>,
    pub max_payable_msat: u64,
    pub max_receivable_msat: u64,
    pub max_single_payment_amount_msat: u64,
    pub max_chan_reserve_msats: u64,
    pub connected_peers: Vec<String>,
    pub inbound_liquidity_msats: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspInformation {
    pub id: String,
    pub name: String,
    pub widget_url: String,
    pub pubkey: String,
    pub host: String,
    pub base_fee_msat: i64,
    pub fee_rate: f64,
    pub time_lock_delta: u32,
    pub min_htlc_msat: i64,
    #[serde(with = "serde_bytes")]
    pub lsp_pubkey: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupStatus {
    pub backed_up: bool,
    pub last_backup_time: Option<u64>,
}

/// Fee estimates in sat/vbyte.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFees {
    pub fastest_fee: u64,
    pub half_hour_fee: u64,
    pub hour_fee: u64,
    pub economy_fee: u64,
    pub minimum_fee: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectLspRequest {
    pub lsp_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageRequest {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageResponse {
    pub signature: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckMessageRequest {
    pub message: String,
    pub pubkey: String,
    pub signature: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckMessageResponse {
    pub is_valid: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchLspInfoRequest {
    pub lsp_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteCommandRequest {
    pub command: String,
}

pub static CONNECT_LSP_REQUEST: Schema = Schema {
    name: "ConnectLspRequest",
    fields: &[FieldSpec::required("lspId", Shape::Str)],
};

pub static SIGN_MESSAGE_REQUEST: Schema = Schema {
    name: "SignMessageRequest",
    fields: &[FieldSpec::required("message", Shape::Str)],
};

pub static CHECK_MESSAGE_REQUEST: Schema = Schema {
    name: "CheckMessageRequest",
    fields: &[
        FieldSpec::required("message", Shape::Str),
        FieldSpec::required("pubkey", Shape::Str),
        FieldSpec::required("signature", Shape::Str),
    ],
};

pub static FETCH_LSP_INFO_REQUEST: Schema = Schema {
    name: "FetchLspInfoRequest",
    fields: &[FieldSpec::required("lspId", Shape::Str)],
};

pub static EXECUTE_COMMAND_REQUEST: Schema = Schema {
    name: "ExecuteCommandRequest",
    fields: &[FieldSpec::required("command", Shape::Str)],
};

impl_request! {
    ConnectLspRequest => CONNECT_LSP_REQUEST,
    FetchLspInfoRequest => FETCH_LSP_INFO_REQUEST,
    ExecuteCommandRequest => EXECUTE_COMMAND_REQUEST,
    SignMessageRequest => SIGN_MESSAGE_REQUEST,
    CheckMessageRequest => CHECK_MESSAGE_REQUEST,
}
