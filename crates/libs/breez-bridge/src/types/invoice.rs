use serde::{Deserialize, Serialize};

use super::config::Network;
use crate::marshal::impl_request;
use crate::schema::{FieldSpec, Schema, Shape};

/// A decoded BOLT11 invoice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnInvoice {
    pub bolt11: String,
    pub network: Network,
    pub payee_pubkey: String,
    pub payment_hash: String,
    pub description: Option<String>,
    pub description_hash: Option<String>,
    pub amount_msat: Option<u64>,
    pub timestamp: u64,
    pub expiry: u64,
    pub routing_hints: Vec<RouteHint>,
    #[serde(with = "serde_bytes")]
    pub payment_secret: Vec<u8>,
    pub min_final_cltv_expiry_delta: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteHint {
    pub hops: Vec<RouteHintHop>,
}

/// One hop of a private route hint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteHintHop {
    pub src_node_id: String,
    pub short_channel_id: u64,
    pub fees_base_msat: u32,
    pub fees_proportional_millionths: u32,
    pub cltv_expiry_delta: u64,
    pub htlc_minimum_msat: Option<u64>,
    pub htlc_maximum_msat: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseInvoiceRequest {
    pub invoice: String,
}

pub static PARSE_INVOICE_REQUEST: Schema = Schema {
    name: "ParseInvoiceRequest",
    fields: &[FieldSpec::required("invoice", Shape::Str)],
};

impl_request! {
    ParseInvoiceRequest => PARSE_INVOICE_REQUEST,
}
