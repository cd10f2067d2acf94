use serde::{Deserialize, Serialize};

use super::config::Network;
use super::invoice::LnInvoice;
use super::lnurl::{
    LnUrlAuthRequestData, LnUrlErrorData, LnUrlPayRequestData, LnUrlWithdrawRequestData,
};
use crate::marshal::impl_request;
use crate::schema::{FieldSpec, Schema, Shape};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitcoinAddressData {
    pub address: String,
    pub network: Network,
    pub amount_sat: Option<u64>,
    pub label: Option<String>,
    pub message: Option<String>,
}

/// What a user-supplied string turned out to be.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InputType {
    BitcoinAddress { address: BitcoinAddressData },
    Bolt11 { invoice: LnInvoice },
    NodeId { node_id: String },
    Url { url: String },
    LnUrlPay { data: LnUrlPayRequestData },
    LnUrlWithdraw { data: LnUrlWithdrawRequestData },
    LnUrlAuth { data: LnUrlAuthRequestData },
    LnUrlError { data: LnUrlErrorData },
    Bolt12Offer { offer: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseInputRequest {
    pub input: String,
}

pub static PARSE_INPUT_REQUEST: Schema = Schema {
    name: "ParseInputRequest",
    fields: &[FieldSpec::required("input", Shape::Str)],
};

impl_request! {
    ParseInputRequest => PARSE_INPUT_REQUEST,
}
