use serde::de::{
    self, DeserializeOwned, DeserializeSeed, EnumAccess, IntoDeserializer, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use thiserror::Error;

use super::{HostMap, HostValue};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot decode host value: {0}")]
pub struct DecodeError(String);

impl de::Error for DecodeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

impl HostValue {
    /// Deserializes a typed value out of this host value.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, DecodeError> {
        T::deserialize(self)
    }
}

impl<'de> de::Deserializer<'de> for HostValue {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        match self {
            Self::Null => visitor.visit_unit(),
            Self::Bool(value) => visitor.visit_bool(value),
            Self::Int(value) => visitor.visit_i64(value),
            Self::UInt(value) => visitor.visit_u64(value),
            Self::Float(value) => visitor.visit_f64(value),
            Self::String(value) => visitor.visit_string(value),
            Self::Bytes(value) => visitor.visit_byte_buf(value),
            Self::List(values) => visitor.visit_seq(ListAccess::new(values)),
            Self::Map(map) => visitor.visit_map(EntryAccess::new(map)),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        match self {
            Self::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        match self {
            Self::Bytes(value) => visitor.visit_byte_buf(value),
            Self::List(values) => visitor.visit_seq(ListAccess::new(values)),
            other => Err(DecodeError(format!("expected bytes, found {}", other.shape_name()))),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        match self {
            Self::String(variant) => {
                let access: de::value::StringDeserializer<DecodeError> =
                    variant.into_deserializer();
                visitor.visit_enum(access)
            }
            Self::Map(map) if map.len() == 1 => {
                let mut entries = map.into_iter();
                match entries.next() {
                    Some((variant, payload)) => {
                        visitor.visit_enum(VariantPayload { variant, payload })
                    }
                    None => Err(DecodeError("enum map without variant".to_owned())),
                }
            }
            other => Err(DecodeError(format!(
                "expected enum variant name or single-entry map, found {}",
                other.shape_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        unit unit_struct seq tuple tuple_struct map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, DecodeError> for HostValue {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

struct ListAccess {
    values: std::vec::IntoIter<HostValue>,
}

impl ListAccess {
    fn new(values: Vec<HostValue>) -> Self {
        Self { values: values.into_iter() }
    }
}

impl<'de> SeqAccess<'de> for ListAccess {
    type Error = DecodeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, DecodeError> {
        match self.values.next() {
            Some(value) => seed.deserialize(value).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.values.len())
    }
}

struct EntryAccess {
    entries: std::collections::btree_map::IntoIter<String, HostValue>,
    pending: Option<HostValue>,
}

impl EntryAccess {
    fn new(map: HostMap) -> Self {
        Self { entries: map.into_iter(), pending: None }
    }
}

impl<'de> MapAccess<'de> for EntryAccess {
    type Error = DecodeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, DecodeError> {
        match self.entries.next() {
            Some((key, value)) => {
                self.pending = Some(value);
                seed.deserialize(HostValue::String(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(
        &mut self,
        seed: V,
    ) -> Result<V::Value, DecodeError> {
        let value = self
            .pending
            .take()
            .ok_or_else(|| DecodeError("map value requested before its key".to_owned()))?;
        seed.deserialize(value)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

struct VariantPayload {
    variant: String,
    payload: HostValue,
}

impl<'de> EnumAccess<'de> for VariantPayload {
    type Error = DecodeError;
    type Variant = HostValue;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, HostValue), DecodeError> {
        let variant = seed.deserialize(HostValue::String(self.variant))?;
        Ok((variant, self.payload))
    }
}

impl<'de> VariantAccess<'de> for HostValue {
    type Error = DecodeError;

    fn unit_variant(self) -> Result<(), DecodeError> {
        match self {
            Self::Null => Ok(()),
            other => Err(DecodeError(format!("unit variant carries {}", other.shape_name()))),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(
        self,
        seed: T,
    ) -> Result<T::Value, DecodeError> {
        seed.deserialize(self)
    }

    fn tuple_variant<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        de::Deserializer::deserialize_seq(self, visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        de::Deserializer::deserialize_map(self, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{host_map, to_host_value};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    enum Network {
        Bitcoin,
        Regtest,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Request {
        node_id: String,
        amount_msat: u64,
        network: Network,
        label: Option<String>,
        #[serde(with = "serde_bytes")]
        preimage: Vec<u8>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "camelCase")]
    enum Union {
        Url { url: String },
        Synced,
    }

    #[test]
    fn decodes_struct_with_enum_option_and_bytes() {
        let args = HostValue::Map(host_map([
            ("nodeId", HostValue::from("02aa")),
            ("amountMsat", HostValue::UInt(5_000)),
            ("network", HostValue::from("regtest")),
            ("preimage", HostValue::Bytes(vec![9; 32])),
        ]));
        let decoded: Request = args.decode().expect("decode request");
        assert_eq!(
            decoded,
            Request {
                node_id: "02aa".to_owned(),
                amount_msat: 5_000,
                network: Network::Regtest,
                label: None,
                preimage: vec![9; 32],
            }
        );
    }

    #[test]
    fn encode_then_decode_is_identity_for_tagged_unions() {
        let original = Union::Url { url: "https://breez.technology".to_owned() };
        let decoded: Union = to_host_value(&original).expect("encode").decode().expect("decode");
        assert_eq!(decoded, original);

        let decoded: Union =
            to_host_value(&Union::Synced).expect("encode").decode().expect("decode");
        assert_eq!(decoded, Union::Synced);
    }

    #[test]
    fn negative_integer_does_not_decode_into_unsigned_field() {
        let args = HostValue::Map(host_map([
            ("nodeId", HostValue::from("02aa")),
            ("amountMsat", HostValue::Int(-1)),
            ("network", HostValue::from("bitcoin")),
            ("preimage", HostValue::Bytes(vec![])),
        ]));
        assert!(args.decode::<Request>().is_err());
    }
}
