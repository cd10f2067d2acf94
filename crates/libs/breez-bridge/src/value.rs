//! Host-neutral value model.
//!
//! Every host runtime hands the bridge a [`HostMap`] of arguments and receives a
//! [`HostValue`] back. The model is deliberately small: the scalar kinds every
//! binding target can represent, byte strings, sequences and string-keyed maps.
//! `Null` is the single "no value" marker used for absent optional fields.

mod de;
mod ser;

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

pub use de::DecodeError;
pub use ser::{to_host_value, EncodeError};

/// Ordered, string-keyed mapping used for call arguments and results.
pub type HostMap = BTreeMap<String, HostValue>;

#[derive(Clone, Debug, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<HostValue>),
    Map(HostMap),
}

impl HostValue {
    /// Short shape name used in validation messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(value) => Some(*value),
            Self::Int(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[HostValue]> {
        match self {
            Self::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HostMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a map.
    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Converts into JSON for text-based hosts. Bytes become arrays of numbers
    /// and non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(value) => JsonValue::Bool(*value),
            Self::Int(value) => JsonValue::from(*value),
            Self::UInt(value) => JsonValue::from(*value),
            Self::Float(value) => {
                JsonNumber::from_f64(*value).map(JsonValue::Number).unwrap_or(JsonValue::Null)
            }
            Self::String(value) => JsonValue::String(value.clone()),
            Self::Bytes(bytes) => {
                JsonValue::Array(bytes.iter().map(|byte| JsonValue::from(*byte)).collect())
            }
            Self::List(values) => JsonValue::Array(values.iter().map(Self::to_json).collect()),
            Self::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<JsonMap<_, _>>(),
            ),
        }
    }
}

impl From<JsonValue> for HostValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(value) => Self::Bool(value),
            JsonValue::Number(number) => {
                if let Some(value) = number.as_u64() {
                    Self::UInt(value)
                } else if let Some(value) = number.as_i64() {
                    Self::Int(value)
                } else {
                    Self::Float(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(value) => Self::String(value),
            JsonValue::Array(values) => Self::List(values.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => {
                Self::Map(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
            }
        }
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for HostValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<u32> for HostValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<u8>> for HostValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<HostMap> for HostValue {
    fn from(value: HostMap) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

impl Serialize for HostValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Bytes(value) => serializer.serialize_bytes(value),
            Self::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Builds a [`HostMap`] from `(key, value)` pairs.
pub fn host_map<K, V, I>(entries: I) -> HostMap
where
    K: Into<String>,
    V: Into<HostValue>,
    I: IntoIterator<Item = (K, V)>,
{
    entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_numbers_keep_integer_width() {
        let value = HostValue::from(json!({
            "big": u64::MAX,
            "negative": -5,
            "fraction": 1.5,
        }));
        assert_eq!(value.get("big"), Some(&HostValue::UInt(u64::MAX)));
        assert_eq!(value.get("negative"), Some(&HostValue::Int(-5)));
        assert_eq!(value.get("fraction"), Some(&HostValue::Float(1.5)));
    }

    #[test]
    fn bytes_render_as_json_number_arrays() {
        let value = HostValue::Bytes(vec![0, 7, 255]);
        assert_eq!(value.to_json(), json!([0, 7, 255]));
    }

    #[test]
    fn option_none_becomes_null_marker() {
        let value: HostValue = Option::<String>::None.into();
        assert!(value.is_null());
        let map = host_map([("label", Some("coffee")), ("note", None)]);
        assert_eq!(map["label"], HostValue::from("coffee"));
        assert!(map["note"].is_null());
    }

    #[test]
    fn serialize_to_json_matches_to_json() {
        let value = HostValue::Map(host_map([
            ("amountMsat", HostValue::UInt(1_000)),
            ("tags", HostValue::List(vec!["a".into(), "b".into()])),
        ]));
        let via_serde = serde_json::to_value(&value).expect("serialize host value");
        assert_eq!(via_serde, value.to_json());
    }
}
