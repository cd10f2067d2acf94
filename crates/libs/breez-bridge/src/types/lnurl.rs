use serde::{Deserialize, Serialize};

use super::payment::Payment;
use crate::marshal::impl_request;
use crate::schema::{FieldSpec, Schema, Shape};

/// LNURL-pay endpoint parameters (LUD-06).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnUrlPayRequestData {
    pub callback: String,
    pub min_sendable: u64,
    pub max_sendable: u64,
    /// Raw metadata string as served by the endpoint.
    pub metadata_str: String,
    pub comment_allowed: u16,
    pub domain: String,
    pub ln_address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnUrlWithdrawRequestData {
    pub callback: String,
    pub k1: String,
    pub default_description: String,
    pub min_withdrawable: u64,
    pub max_withdrawable: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnUrlAuthRequestData {
    pub k1: String,
    pub action: Option<String>,
    pub domain: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnUrlErrorData {
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSuccessActionData {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlSuccessActionData {
    pub description: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SuccessActionProcessed {
    Message { data: MessageSuccessActionData },
    Url { data: UrlSuccessActionData },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnUrlPayRequest {
    pub data: LnUrlPayRequestData,
    pub amount_msat: u64,
    pub comment: Option<String>,
    pub payment_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnUrlPaySuccessData {
    pub payment: Payment,
    pub success_action: Option<SuccessActionProcessed>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnUrlPayErrorData {
    pub payment_hash: String,
    pub reason: String,
}

/// Outcome of an LNURL-pay flow. Endpoint and payment failures are results,
/// not errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LnUrlPayResult {
    EndpointSuccess { data: LnUrlPaySuccessData },
    EndpointError { data: LnUrlErrorData },
    PayError { data: LnUrlPayErrorData },
}

/// Endpoint verdict for LNURL-withdraw and LNURL-auth callbacks (LUD-03, LUD-04).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LnUrlCallbackStatus {
    Ok,
    ErrorStatus { data: LnUrlErrorData },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnUrlWithdrawRequest {
    pub data: LnUrlWithdrawRequestData,
    pub amount_msat: u64,
    pub description: Option<String>,
}

pub static LN_URL_PAY_REQUEST_DATA: Schema = Schema {
    name: "LnUrlPayRequestData",
    fields: &[
        FieldSpec::required("callback", Shape::Str),
        FieldSpec::required("minSendable", Shape::U64),
        FieldSpec::required("maxSendable", Shape::U64),
        FieldSpec::required("metadataStr", Shape::Str),
        FieldSpec::required("commentAllowed", Shape::U16),
        FieldSpec::required("domain", Shape::Str),
        FieldSpec::optional("lnAddress", Shape::Str),
    ],
};

pub static LN_URL_PAY_REQUEST: Schema = Schema {
    name: "LnUrlPayRequest",
    fields: &[
        FieldSpec::required("data", Shape::Record(&LN_URL_PAY_REQUEST_DATA)),
        FieldSpec::required("amountMsat", Shape::U64),
        FieldSpec::optional("comment", Shape::Str),
        FieldSpec::optional("paymentLabel", Shape::Str),
    ],
};

pub static LN_URL_WITHDRAW_REQUEST_DATA: Schema = Schema {
    name: "LnUrlWithdrawRequestData",
    fields: &[
        FieldSpec::required("callback", Shape::Str),
        FieldSpec::required("k1", Shape::Str),
        FieldSpec::required("defaultDescription", Shape::Str),
        FieldSpec::required("minWithdrawable", Shape::U64),
        FieldSpec::required("maxWithdrawable", Shape::U64),
    ],
};

pub static LN_URL_WITHDRAW_REQUEST: Schema = Schema {
    name: "LnUrlWithdrawRequest",
    fields: &[
        FieldSpec::required("data", Shape::Record(&LN_URL_WITHDRAW_REQUEST_DATA)),
        FieldSpec::required("amountMsat", Shape::U64),
        FieldSpec::optional("description", Shape::Str),
    ],
};

/// `lnurlAuth` takes the parsed endpoint data as its arguments.
pub static LN_URL_AUTH_REQUEST_DATA: Schema = Schema {
    name: "LnUrlAuthRequestData",
    fields: &[
        FieldSpec::required("k1", Shape::Str),
        FieldSpec::optional("action", Shape::OneOf(&["register", "login", "link", "auth"])),
        FieldSpec::required("domain", Shape::Str),
        FieldSpec::required("url", Shape::Str),
    ],
};

impl_request! {
    LnUrlPayRequestData => LN_URL_PAY_REQUEST_DATA,
    LnUrlPayRequest => LN_URL_PAY_REQUEST,
    LnUrlWithdrawRequestData => LN_URL_WITHDRAW_REQUEST_DATA,
    LnUrlWithdrawRequest => LN_URL_WITHDRAW_REQUEST,
    LnUrlAuthRequestData => LN_URL_AUTH_REQUEST_DATA,
}
