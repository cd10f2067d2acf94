use serde::{Deserialize, Serialize};

use super::invoice::LnInvoice;
use super::payment::Payment;
use crate::marshal::impl_request;
use crate::schema::{FieldSpec, Schema, Shape};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapStatus {
    Initial,
    WaitingConfirmation,
    Redeemable,
    Redeemed,
    Refundable,
    Completed,
}

/// An on-chain to lightning swap tracked by the core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    pub bitcoin_address: String,
    pub created_at: i64,
    pub lock_height: i64,
    #[serde(with = "serde_bytes")]
    pub payment_hash: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub public_key: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub swapper_public_key: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub script: Vec<u8>,
    pub bolt11: Option<String>,
    pub paid_msat: u64,
    pub confirmed_sats: u64,
    pub unconfirmed_sats: u64,
    pub status: SwapStatus,
    pub refund_tx_ids: Vec<String>,
    pub confirmed_tx_ids: Vec<String>,
    pub min_allowed_deposit: i64,
    pub max_allowed_deposit: i64,
    pub last_redeem_error: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReverseSwapStatus {
    Initial,
    InProgress,
    Cancelled,
    CompletedSeen,
    CompletedConfirmed,
}

/// A lightning to on-chain swap tracked by the core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseSwapInfo {
    pub id: String,
    pub claim_pubkey: String,
    pub lockup_txid: Option<String>,
    pub claim_txid: Option<String>,
    pub onchain_amount_sat: u64,
    pub status: ReverseSwapStatus,
}

/// Fee terms of the reverse swap service. `fees_hash` pins them for
/// [`SendOnchainRequest::pair_hash`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseSwapPairInfo {
    pub min: u64,
    pub max: u64,
    pub fees_hash: String,
    pub fees_percentage: f64,
    pub fees_lockup: u64,
    pub fees_claim: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOnchainRequest {
    pub amount_sat: u64,
    pub onchain_recipient_address: String,
    pub pair_hash: String,
    pub sat_per_vbyte: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOnchainResponse {
    pub reverse_swap_info: ReverseSwapInfo,
}

/// Refund of an expired swap's on-chain deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub swap_address: String,
    pub to_address: String,
    pub sat_per_vbyte: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub refund_tx_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePaidDetails {
    pub payment_hash: String,
    pub bolt11: String,
    pub payment: Option<Payment>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFailedData {
    pub error: String,
    pub node_id: String,
    pub invoice: Option<LnInvoice>,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFailedData {
    pub error: String,
}

pub static SEND_ONCHAIN_REQUEST: Schema = Schema {
    name: "SendOnchainRequest",
    fields: &[
        FieldSpec::required("amountSat", Shape::U64),
        FieldSpec::required("onchainRecipientAddress", Shape::Str),
        FieldSpec::required("pairHash", Shape::Str),
        FieldSpec::required("satPerVbyte", Shape::U64),
    ],
};

pub static REFUND_REQUEST: Schema = Schema {
    name: "RefundRequest",
    fields: &[
        FieldSpec::required("swapAddress", Shape::Str),
        FieldSpec::required("toAddress", Shape::Str),
        FieldSpec::required("satPerVbyte", Shape::U32),
    ],
};

impl_request! {
    SendOnchainRequest => SEND_ONCHAIN_REQUEST,
    RefundRequest => REFUND_REQUEST,
}
