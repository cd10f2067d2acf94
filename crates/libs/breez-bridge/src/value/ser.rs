use serde::ser::{self, Serialize};
use thiserror::Error;

use super::{HostMap, HostValue};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot encode value for host: {0}")]
pub struct EncodeError(String);

impl ser::Error for EncodeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

/// Serializes any `Serialize` value into a [`HostValue`].
///
/// Derived impls of plain data types always succeed: structs become maps,
/// `None`/unit become `Null`, `serde_bytes` fields become `Bytes`, and enum
/// variants follow their serde representation.
pub fn to_host_value<T: Serialize + ?Sized>(value: &T) -> Result<HostValue, EncodeError> {
    value.serialize(HostValueSerializer)
}

pub(crate) struct HostValueSerializer;

impl ser::Serializer for HostValueSerializer {
    type Ok = HostValue;
    type Error = EncodeError;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = VariantSeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = MapBuilder;
    type SerializeStructVariant = VariantMapBuilder;

    fn serialize_bool(self, v: bool) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<HostValue, EncodeError> {
        Ok(HostValue::UInt(u64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<HostValue, EncodeError> {
        Ok(HostValue::UInt(u64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<HostValue, EncodeError> {
        Ok(HostValue::UInt(u64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<HostValue, EncodeError> {
        Ok(HostValue::UInt(v))
    }

    fn serialize_f32(self, v: f32) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<HostValue, EncodeError> {
        Ok(HostValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<HostValue, EncodeError> {
        Ok(HostValue::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<HostValue, EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<HostValue, EncodeError> {
        Ok(HostValue::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<HostValue, EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<HostValue, EncodeError> {
        let mut map = HostMap::new();
        map.insert(variant.to_owned(), value.serialize(HostValueSerializer)?);
        Ok(HostValue::Map(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, EncodeError> {
        Ok(SeqBuilder { items: Vec::with_capacity(len.unwrap_or(0)) })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantSeqBuilder, EncodeError> {
        Ok(VariantSeqBuilder { variant, items: Vec::with_capacity(len) })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapBuilder, EncodeError> {
        Ok(MapBuilder { map: HostMap::new(), pending_key: None })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<MapBuilder, EncodeError> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<VariantMapBuilder, EncodeError> {
        Ok(VariantMapBuilder { variant, map: HostMap::new() })
    }
}

pub(crate) struct SeqBuilder {
    items: Vec<HostValue>,
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = HostValue;
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.items.push(value.serialize(HostValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue, EncodeError> {
        Ok(HostValue::List(self.items))
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = HostValue;
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<HostValue, EncodeError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = HostValue;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<HostValue, EncodeError> {
        ser::SerializeSeq::end(self)
    }
}

pub(crate) struct VariantSeqBuilder {
    variant: &'static str,
    items: Vec<HostValue>,
}

impl ser::SerializeTupleVariant for VariantSeqBuilder {
    type Ok = HostValue;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.items.push(value.serialize(HostValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue, EncodeError> {
        let mut map = HostMap::new();
        map.insert(self.variant.to_owned(), HostValue::List(self.items));
        Ok(HostValue::Map(map))
    }
}

pub(crate) struct MapBuilder {
    map: HostMap,
    pending_key: Option<String>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = HostValue;
    type Error = EncodeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), EncodeError> {
        self.pending_key = Some(map_key(key.serialize(HostValueSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| EncodeError("map value serialized before its key".to_owned()))?;
        self.map.insert(key, value.serialize(HostValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Map(self.map))
    }
}

impl ser::SerializeStruct for MapBuilder {
    type Ok = HostValue;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.map.insert(key.to_owned(), value.serialize(HostValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue, EncodeError> {
        Ok(HostValue::Map(self.map))
    }
}

pub(crate) struct VariantMapBuilder {
    variant: &'static str,
    map: HostMap,
}

impl ser::SerializeStructVariant for VariantMapBuilder {
    type Ok = HostValue;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.map.insert(key.to_owned(), value.serialize(HostValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue, EncodeError> {
        let mut outer = HostMap::new();
        outer.insert(self.variant.to_owned(), HostValue::Map(self.map));
        Ok(HostValue::Map(outer))
    }
}

// Map keys must be strings on every host; integers and booleans are rendered.
fn map_key(key: HostValue) -> Result<String, EncodeError> {
    match key {
        HostValue::String(key) => Ok(key),
        HostValue::Int(key) => Ok(key.to_string()),
        HostValue::UInt(key) => Ok(key.to_string()),
        HostValue::Bool(key) => Ok(key.to_string()),
        other => {
            Err(EncodeError(format!("map key must be a string, found {}", other.shape_name())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        amount_msat: u64,
        label: Option<String>,
        #[serde(with = "serde_bytes")]
        preimage: Vec<u8>,
        hops: Vec<u32>,
    }

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
    enum Tagged {
        NodeId { node_id: String },
        Synced,
    }

    #[test]
    fn struct_fields_mirror_one_to_one() {
        let value = to_host_value(&Sample {
            amount_msat: 21,
            label: None,
            preimage: vec![1, 2],
            hops: vec![],
        })
        .expect("encode sample");
        let map = value.as_map().expect("map");
        assert_eq!(map.len(), 4);
        assert_eq!(map["amountMsat"], HostValue::UInt(21));
        assert_eq!(map["label"], HostValue::Null);
        assert_eq!(map["preimage"], HostValue::Bytes(vec![1, 2]));
        assert_eq!(map["hops"], HostValue::List(vec![]));
    }

    #[test]
    fn internally_tagged_enum_carries_discriminant() {
        let value =
            to_host_value(&Tagged::NodeId { node_id: "02ab".to_owned() }).expect("encode variant");
        assert_eq!(value.get("type"), Some(&HostValue::from("nodeId")));
        assert_eq!(value.get("nodeId"), Some(&HostValue::from("02ab")));

        let unit = to_host_value(&Tagged::Synced).expect("encode unit variant");
        assert_eq!(unit.as_map().map(BTreeMap::len), Some(1));
        assert_eq!(unit.get("type"), Some(&HostValue::from("synced")));
    }

    #[test]
    fn integer_map_keys_are_rendered_as_strings() {
        let mut source = BTreeMap::new();
        source.insert(7_u32, "seven");
        let value = to_host_value(&source).expect("encode int-keyed map");
        assert_eq!(value.get("7"), Some(&HostValue::from("seven")));
    }
}
