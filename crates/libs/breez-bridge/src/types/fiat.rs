use serde::{Deserialize, Serialize};

use crate::marshal::impl_request;
use crate::schema::{FieldSpec, Schema, Shape};

pub const BUY_BITCOIN_PROVIDERS: &[&str] = &["moonpay"];

/// Exchange rate of one bitcoin in `coin`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub coin: String,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub grapheme: Option<String>,
    pub template: Option<String>,
    pub rtl: Option<bool>,
    pub position: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedName {
    pub locale: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleOverrides {
    pub locale: String,
    pub spacing: Option<u32>,
    pub symbol: Symbol,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    pub name: String,
    pub fraction_size: u32,
    pub spacing: Option<u32>,
    pub symbol: Option<Symbol>,
    pub uniq_symbol: Option<Symbol>,
    pub localized_name: Option<Vec<LocalizedName>>,
    pub locale_overrides: Option<Vec<LocaleOverrides>>,
}

/// A currency of the fiat rate feed, keyed by its ISO 4217 code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiatCurrency {
    pub id: String,
    pub info: CurrencyInfo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuyBitcoinProvider {
    Moonpay,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyBitcoinRequest {
    pub provider: BuyBitcoinProvider,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyBitcoinResponse {
    pub url: String,
}

pub static BUY_BITCOIN_REQUEST: Schema = Schema {
    name: "BuyBitcoinRequest",
    fields: &[FieldSpec::required("provider", Shape::OneOf(BUY_BITCOIN_PROVIDERS))],
};

impl_request! {
    BuyBitcoinRequest => BUY_BITCOIN_REQUEST,
}
