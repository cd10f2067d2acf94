use serde::{Deserialize, Serialize};

use super::invoice::LnInvoice;
use super::lnurl::SuccessActionProcessed;
use crate::marshal::impl_request;
use crate::schema::{FieldSpec, Schema, Shape};

pub const PAYMENT_TYPE_FILTERS: &[&str] = &["sent", "received", "closedChannel"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentType {
    Sent,
    Received,
    ClosedChannel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    Pending,
    Complete,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentTypeFilter {
    Sent,
    Received,
    ClosedChannel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelState {
    PendingOpen,
    Opened,
    PendingClose,
    Closed,
}

/// A payment as stored by the core, either direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub payment_type: PaymentType,
    pub payment_time: i64,
    pub amount_msat: u64,
    pub fee_msat: u64,
    pub status: PaymentStatus,
    pub error: Option<String>,
    pub description: Option<String>,
    pub details: PaymentDetails,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PaymentDetails {
    Ln { data: LnPaymentDetails },
    ClosedChannel { data: ClosedChannelPaymentDetails },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnPaymentDetails {
    pub payment_hash: String,
    pub label: String,
    pub destination_pubkey: String,
    pub payment_preimage: String,
    pub keysend: bool,
    pub bolt11: String,
    /// Set for sent LNURL-pay payments whose endpoint returned a success action.
    pub lnurl_success_action: Option<SuccessActionProcessed>,
    pub ln_address: Option<String>,
    pub lnurl_metadata: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedChannelPaymentDetails {
    pub short_channel_id: String,
    pub state: ChannelState,
    pub funding_txid: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPaymentRequest {
    pub bolt11: String,
    pub amount_msat: Option<u64>,
    pub label: Option<String>,
}

/// Custom TLV record attached to a keysend payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlvEntry {
    pub field_number: u64,
    #[serde(with = "serde_bytes")]
    pub value: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSpontaneousPaymentRequest {
    pub node_id: String,
    pub amount_msat: u64,
    pub extra_tlvs: Option<Vec<TlvEntry>>,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPaymentResponse {
    pub payment: Payment,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivePaymentRequest {
    pub amount_msat: u64,
    pub description: String,
    #[serde(default, with = "serde_bytes")]
    pub preimage: Option<Vec<u8>>,
    pub use_description_hash: Option<bool>,
    pub expiry: Option<u32>,
    pub cltv: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivePaymentResponse {
    pub ln_invoice: LnInvoice,
    pub opening_fee_msat: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsRequest {
    pub filters: Option<Vec<PaymentTypeFilter>>,
    pub from_timestamp: Option<i64>,
    pub to_timestamp: Option<i64>,
    pub include_failures: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentByHashRequest {
    pub hash: String,
}

/// Sweep of closed-channel funds to an on-chain address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareSweepRequest {
    pub to_address: String,
    pub sat_per_vbyte: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareSweepResponse {
    pub sweep_tx_weight: u64,
    pub sweep_tx_fee_sat: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub description: String,
    pub amount_msat: Option<u64>,
    pub absolute_expiry: Option<u64>,
    pub issuer: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferResponse {
    pub offer: String,
}

/// Pays a BOLT12 offer; `req` is the encoded offer string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayOfferRequest {
    pub req: String,
    pub amount_msat: Option<u64>,
    pub payer_note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayOfferResponse {
    pub payment: Payment,
}

pub static SEND_PAYMENT_REQUEST: Schema = Schema {
    name: "SendPaymentRequest",
    fields: &[
        FieldSpec::required("bolt11", Shape::Str),
        FieldSpec::optional("amountMsat", Shape::U64),
        FieldSpec::optional("label", Shape::Str),
    ],
};

pub static TLV_ENTRY: Schema = Schema {
    name: "TlvEntry",
    fields: &[
        FieldSpec::required("fieldNumber", Shape::U64),
        FieldSpec::required("value", Shape::Bytes { min: 0, max: usize::MAX }),
    ],
};

pub static SEND_SPONTANEOUS_PAYMENT_REQUEST: Schema = Schema {
    name: "SendSpontaneousPaymentRequest",
    fields: &[
        FieldSpec::required("nodeId", Shape::Str),
        FieldSpec::required("amountMsat", Shape::U64),
        FieldSpec::optional("extraTlvs", Shape::List(&Shape::Record(&TLV_ENTRY))),
        FieldSpec::optional("label", Shape::Str),
    ],
};

pub static RECEIVE_PAYMENT_REQUEST: Schema = Schema {
    name: "ReceivePaymentRequest",
    fields: &[
        FieldSpec::required("amountMsat", Shape::U64),
        FieldSpec::required("description", Shape::Str),
        FieldSpec::optional("preimage", Shape::Bytes { min: 32, max: 32 }),
        FieldSpec::optional("useDescriptionHash", Shape::Bool),
        FieldSpec::optional("expiry", Shape::U32),
        FieldSpec::optional("cltv", Shape::U32),
    ],
};

pub static LIST_PAYMENTS_REQUEST: Schema = Schema {
    name: "ListPaymentsRequest",
    fields: &[
        FieldSpec::optional("filters", Shape::List(&Shape::OneOf(PAYMENT_TYPE_FILTERS))),
        FieldSpec::optional("fromTimestamp", Shape::I64),
        FieldSpec::optional("toTimestamp", Shape::I64),
        FieldSpec::optional("includeFailures", Shape::Bool),
        FieldSpec::optional("limit", Shape::U32),
        FieldSpec::optional("offset", Shape::U32),
    ],
};

pub static PAYMENT_BY_HASH_REQUEST: Schema = Schema {
    name: "PaymentByHashRequest",
    fields: &[FieldSpec::required("hash", Shape::Str)],
};

pub static PREPARE_SWEEP_REQUEST: Schema = Schema {
    name: "PrepareSweepRequest",
    fields: &[
        FieldSpec::required("toAddress", Shape::Str),
        FieldSpec::required("satPerVbyte", Shape::U32),
    ],
};

pub static CREATE_OFFER_REQUEST: Schema = Schema {
    name: "CreateOfferRequest",
    fields: &[
        FieldSpec::required("description", Shape::Str),
        FieldSpec::optional("amountMsat", Shape::U64),
        FieldSpec::optional("absoluteExpiry", Shape::U64),
        FieldSpec::optional("issuer", Shape::Str),
    ],
};

pub static PAY_OFFER_REQUEST: Schema = Schema {
    name: "PayOfferRequest",
    fields: &[
        FieldSpec::required("req", Shape::Str),
        FieldSpec::optional("amountMsat", Shape::U64),
        FieldSpec::optional("payerNote", Shape::Str),
    ],
};

impl_request! {
    SendPaymentRequest => SEND_PAYMENT_REQUEST,
    SendSpontaneousPaymentRequest => SEND_SPONTANEOUS_PAYMENT_REQUEST,
    ReceivePaymentRequest => RECEIVE_PAYMENT_REQUEST,
    ListPaymentsRequest => LIST_PAYMENTS_REQUEST,
    PaymentByHashRequest => PAYMENT_BY_HASH_REQUEST,
    PrepareSweepRequest => PREPARE_SWEEP_REQUEST,
    CreateOfferRequest => CREATE_OFFER_REQUEST,
    PayOfferRequest => PAY_OFFER_REQUEST,
}
