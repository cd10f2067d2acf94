//! Request schemas as data.
//!
//! Every request type declares one static [`Schema`]. Validation walks the
//! schema, checks presence, shape and integer width of each field, and
//! produces a normalized map that the typed request deserializes from.
//! Adding an operation means adding a schema, never new parsing code.

use crate::error::{ValidationError, ValidationReason};
use crate::value::{HostMap, HostValue};

// Largest integer an IEEE double represents exactly (2^53).
const MAX_EXACT_INT: u64 = 1 << 53;
const MAX_EXACT_FLOAT_INT: f64 = MAX_EXACT_INT as f64;

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: Shape,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, shape: Shape) -> Self {
        Self { name, shape, required: true }
    }

    pub const fn optional(name: &'static str, shape: Shape) -> Self {
        Self { name, shape, required: false }
    }
}

#[derive(Debug)]
pub enum Shape {
    Str,
    Bool,
    U16,
    U32,
    U64,
    I64,
    F64,
    /// Byte string whose length must fall in `min..=max`.
    Bytes { min: usize, max: usize },
    /// Case-insensitive string enum; normalized to the listed spelling.
    OneOf(&'static [&'static str]),
    Record(&'static Schema),
    List(&'static Shape),
    /// Map discriminated by `tag`; the remaining fields follow the variant schema.
    Union { tag: &'static str, variants: &'static [(&'static str, &'static Schema)] },
}

impl Shape {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Bool => "boolean",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I64 => "i64",
            Self::F64 => "number",
            Self::Bytes { .. } => "bytes",
            Self::OneOf(_) => "enum string",
            Self::Record(_) => "map",
            Self::List(_) => "list",
            Self::Union { .. } => "tagged map",
        }
    }
}

/// Path-aware validation context: the outer operation plus the field path.
struct Cursor<'a> {
    operation: &'static str,
    path: &'a str,
}

impl Cursor<'_> {
    fn fail(&self, reason: ValidationReason) -> ValidationError {
        ValidationError::new(self.path, self.operation, reason)
    }

    fn wrong_shape(&self, shape: &Shape, found: &HostValue) -> ValidationError {
        self.fail(ValidationReason::WrongShape {
            expected: shape.describe(),
            found: found.shape_name(),
        })
    }
}

impl Schema {
    /// Validates `args` and returns the normalized map.
    ///
    /// `Null` counts as absent. Fields not named by the schema are dropped.
    pub fn validate(&'static self, args: &HostMap) -> Result<HostMap, ValidationError> {
        self.validate_at(self.name, "", args)
    }

    fn validate_at(
        &'static self,
        operation: &'static str,
        prefix: &str,
        args: &HostMap,
    ) -> Result<HostMap, ValidationError> {
        let mut normalized = HostMap::new();
        for field in self.fields {
            let path = join_path(prefix, field.name);
            let cursor = Cursor { operation, path: path.as_str() };
            match args.get(field.name).filter(|value| !value.is_null()) {
                Some(value) => {
                    let value = coerce(&field.shape, value, &cursor)?;
                    normalized.insert(field.name.to_owned(), value);
                }
                None if field.required => return Err(cursor.fail(ValidationReason::Missing)),
                None => {}
            }
        }
        for key in args.keys() {
            if !self.fields.iter().any(|field| field.name == key) {
                log::debug!("{operation}: ignoring unknown field '{}'", join_path(prefix, key));
            }
        }
        Ok(normalized)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|field| field.required).map(|field| field.name)
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn coerce(
    shape: &'static Shape,
    value: &HostValue,
    cursor: &Cursor<'_>,
) -> Result<HostValue, ValidationError> {
    match shape {
        Shape::Str => match value {
            HostValue::String(_) => Ok(value.clone()),
            other => Err(cursor.wrong_shape(shape, other)),
        },
        Shape::Bool => match value {
            HostValue::Bool(_) => Ok(value.clone()),
            other => Err(cursor.wrong_shape(shape, other)),
        },
        Shape::U16 => unsigned(shape, value, cursor, u64::from(u16::MAX)),
        Shape::U32 => unsigned(shape, value, cursor, u64::from(u32::MAX)),
        Shape::U64 => unsigned(shape, value, cursor, u64::MAX),
        Shape::I64 => signed(shape, value, cursor),
        Shape::F64 => match value {
            HostValue::Float(_) => Ok(value.clone()),
            HostValue::UInt(raw) if *raw <= MAX_EXACT_INT => Ok(HostValue::Float(*raw as f64)),
            HostValue::Int(raw) if raw.unsigned_abs() <= MAX_EXACT_INT => {
                Ok(HostValue::Float(*raw as f64))
            }
            HostValue::UInt(_) | HostValue::Int(_) => {
                Err(cursor.fail(ValidationReason::OutOfRange { expected: "number" }))
            }
            other => Err(cursor.wrong_shape(shape, other)),
        },
        Shape::Bytes { min, max } => {
            let bytes = match value {
                HostValue::Bytes(bytes) => bytes.clone(),
                HostValue::List(items) => byte_list(items, cursor)?,
                other => return Err(cursor.wrong_shape(shape, other)),
            };
            if bytes.len() < *min || bytes.len() > *max {
                let expected = if min == max {
                    format!("expected exactly {min} bytes, found {}", bytes.len())
                } else {
                    format!("expected {min}..={max} bytes, found {}", bytes.len())
                };
                return Err(cursor.fail(ValidationReason::Constraint(expected)));
            }
            Ok(HostValue::Bytes(bytes))
        }
        Shape::OneOf(choices) => {
            let raw = match value {
                HostValue::String(raw) => raw,
                other => return Err(cursor.wrong_shape(shape, other)),
            };
            choices
                .iter()
                .find(|choice| choice.eq_ignore_ascii_case(raw))
                .map(|choice| HostValue::String((*choice).to_owned()))
                .ok_or_else(|| {
                    cursor.fail(ValidationReason::Constraint(format!(
                        "'{raw}' is not one of {}",
                        choices.join(", ")
                    )))
                })
        }
        Shape::Record(schema) => match value {
            HostValue::Map(map) => {
                schema.validate_at(cursor.operation, cursor.path, map).map(HostValue::Map)
            }
            other => Err(cursor.wrong_shape(shape, other)),
        },
        Shape::List(item_shape) => match value {
            HostValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let path = format!("{}[{index}]", cursor.path);
                    let item_cursor = Cursor { operation: cursor.operation, path: path.as_str() };
                    if item.is_null() {
                        return Err(item_cursor.fail(ValidationReason::Missing));
                    }
                    coerce(item_shape, item, &item_cursor)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(HostValue::List),
            other => Err(cursor.wrong_shape(shape, other)),
        },
        Shape::Union { tag, variants } => {
            let map = match value {
                HostValue::Map(map) => map,
                other => return Err(cursor.wrong_shape(shape, other)),
            };
            let tag_path = join_path(cursor.path, tag);
            let tag_cursor = Cursor { operation: cursor.operation, path: tag_path.as_str() };
            let raw_tag = match map.get(*tag) {
                Some(HostValue::String(raw)) => raw,
                Some(HostValue::Null) | None => {
                    return Err(tag_cursor.fail(ValidationReason::Missing));
                }
                Some(other) => return Err(tag_cursor.wrong_shape(&Shape::Str, other)),
            };
            let (variant, schema) = variants
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(raw_tag))
                .ok_or_else(|| {
                    tag_cursor.fail(ValidationReason::Constraint(format!(
                        "unknown variant '{raw_tag}'"
                    )))
                })?;
            let mut normalized = schema.validate_at(cursor.operation, cursor.path, map)?;
            normalized.insert((*tag).to_owned(), HostValue::String((*variant).to_owned()));
            Ok(HostValue::Map(normalized))
        }
    }
}

fn unsigned(
    shape: &'static Shape,
    value: &HostValue,
    cursor: &Cursor<'_>,
    max: u64,
) -> Result<HostValue, ValidationError> {
    let out_of_range = || cursor.fail(ValidationReason::OutOfRange { expected: shape.describe() });
    let raw = match value {
        HostValue::UInt(raw) => *raw,
        HostValue::Int(raw) => u64::try_from(*raw).map_err(|_| out_of_range())?,
        HostValue::Float(raw) => {
            exact_float(*raw).and_then(|raw| u64::try_from(raw).ok()).ok_or_else(out_of_range)?
        }
        other => return Err(cursor.wrong_shape(shape, other)),
    };
    if raw > max {
        return Err(out_of_range());
    }
    Ok(HostValue::UInt(raw))
}

fn signed(
    shape: &'static Shape,
    value: &HostValue,
    cursor: &Cursor<'_>,
) -> Result<HostValue, ValidationError> {
    let out_of_range = || cursor.fail(ValidationReason::OutOfRange { expected: shape.describe() });
    let raw = match value {
        HostValue::Int(raw) => *raw,
        HostValue::UInt(raw) => i64::try_from(*raw).map_err(|_| out_of_range())?,
        HostValue::Float(raw) => exact_float(*raw).ok_or_else(out_of_range)?,
        other => return Err(cursor.wrong_shape(shape, other)),
    };
    Ok(HostValue::Int(raw))
}

// Accepts only integral floats inside the exactly representable range.
fn exact_float(raw: f64) -> Option<i64> {
    if raw.is_finite() && raw.fract() == 0.0 && raw.abs() <= MAX_EXACT_FLOAT_INT {
        Some(raw as i64)
    } else {
        None
    }
}

fn byte_list(items: &[HostValue], cursor: &Cursor<'_>) -> Result<Vec<u8>, ValidationError> {
    items
        .iter()
        .map(|item| match item {
            HostValue::UInt(raw) => u8::try_from(*raw).ok(),
            HostValue::Int(raw) => u8::try_from(*raw).ok(),
            HostValue::Float(raw) => exact_float(*raw).and_then(|raw| u8::try_from(raw).ok()),
            _ => None,
        })
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| cursor.fail(ValidationReason::OutOfRange { expected: "byte" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::host_map;

    static HOP: Schema = Schema {
        name: "Hop",
        fields: &[
            FieldSpec::required("nodeId", Shape::Str),
            FieldSpec::optional("feeMsat", Shape::U32),
        ],
    };

    static URL_VARIANT: Schema =
        Schema { name: "Url", fields: &[FieldSpec::required("url", Shape::Str)] };

    static SAMPLE: Schema = Schema {
        name: "SampleRequest",
        fields: &[
            FieldSpec::required("amountMsat", Shape::U64),
            FieldSpec::optional("label", Shape::Str),
            FieldSpec::optional("preimage", Shape::Bytes { min: 32, max: 32 }),
            FieldSpec::optional("network", Shape::OneOf(&["bitcoin", "regtest"])),
            FieldSpec::optional("hops", Shape::List(&Shape::Record(&HOP))),
            FieldSpec::optional(
                "target",
                Shape::Union { tag: "type", variants: &[("url", &URL_VARIANT)] },
            ),
        ],
    };

    fn args(entries: Vec<(&str, HostValue)>) -> HostMap {
        host_map(entries)
    }

    #[test]
    fn integral_float_amount_is_accepted_exactly() {
        let normalized = SAMPLE
            .validate(&args(vec![("amountMsat", HostValue::Float(21_000.0))]))
            .expect("valid amount");
        assert_eq!(normalized["amountMsat"], HostValue::UInt(21_000));
    }

    #[test]
    fn integers_beyond_double_precision_are_not_rounded_into_floats() {
        static RATIO: Schema =
            Schema { name: "RatioRequest", fields: &[FieldSpec::required("ratio", Shape::F64)] };

        let exact = RATIO
            .validate(&args(vec![("ratio", HostValue::UInt(MAX_EXACT_INT))]))
            .expect("2^53 is exact");
        assert_eq!(exact["ratio"], HostValue::Float(9_007_199_254_740_992.0));

        for bad in [
            HostValue::UInt(MAX_EXACT_INT + 1),
            HostValue::Int(-(MAX_EXACT_INT as i64) - 1),
            HostValue::Int(i64::MIN),
        ] {
            let err = RATIO.validate(&args(vec![("ratio", bad)])).expect_err("inexact");
            assert_eq!(err.field, "ratio");
            assert!(matches!(err.reason, ValidationReason::OutOfRange { .. }));
        }
    }

    #[test]
    fn width_and_sign_violations_are_rejected() {
        for bad in [HostValue::Int(-1), HostValue::Float(1.5), HostValue::Float(1e300)] {
            let err = SAMPLE.validate(&args(vec![("amountMsat", bad)])).expect_err("rejected");
            assert_eq!(err.field, "amountMsat");
            assert_eq!(err.operation, "SampleRequest");
            assert!(matches!(err.reason, ValidationReason::OutOfRange { .. }));
        }

        let err = SAMPLE
            .validate(&args(vec![
                ("amountMsat", HostValue::UInt(1)),
                ("hops", HostValue::List(vec![HostValue::Map(host_map([
                    ("nodeId", HostValue::from("02aa")),
                    ("feeMsat", HostValue::UInt(u64::from(u32::MAX) + 1)),
                ]))])),
            ]))
            .expect_err("fee overflow");
        assert_eq!(err.field, "hops[0].feeMsat");
    }

    #[test]
    fn null_counts_as_absent() {
        let err =
            SAMPLE.validate(&args(vec![("amountMsat", HostValue::Null)])).expect_err("missing");
        assert_eq!(err.reason, ValidationReason::Missing);

        let normalized = SAMPLE
            .validate(&args(vec![("amountMsat", HostValue::UInt(1)), ("label", HostValue::Null)]))
            .expect("optional null");
        assert!(!normalized.contains_key("label"));
    }

    #[test]
    fn byte_lists_normalize_and_length_is_enforced() {
        let list = HostValue::List((0..32).map(|i| HostValue::UInt(i)).collect());
        let normalized = SAMPLE
            .validate(&args(vec![("amountMsat", HostValue::UInt(1)), ("preimage", list)]))
            .expect("32 byte list");
        assert_eq!(normalized["preimage"].as_bytes().map(<[u8]>::len), Some(32));

        let err = SAMPLE
            .validate(&args(vec![
                ("amountMsat", HostValue::UInt(1)),
                ("preimage", HostValue::Bytes(vec![0; 31])),
            ]))
            .expect_err("short preimage");
        assert!(matches!(err.reason, ValidationReason::Constraint(_)));

        let err = SAMPLE
            .validate(&args(vec![
                ("amountMsat", HostValue::UInt(1)),
                ("preimage", HostValue::List(vec![HostValue::UInt(256)])),
            ]))
            .expect_err("byte overflow");
        assert!(matches!(err.reason, ValidationReason::OutOfRange { expected: "byte" }));
    }

    #[test]
    fn enum_strings_are_case_insensitive_and_canonicalized() {
        let normalized = SAMPLE
            .validate(&args(vec![
                ("amountMsat", HostValue::UInt(1)),
                ("network", HostValue::from("REGTEST")),
            ]))
            .expect("valid network");
        assert_eq!(normalized["network"], HostValue::from("regtest"));

        let err = SAMPLE
            .validate(&args(vec![
                ("amountMsat", HostValue::UInt(1)),
                ("network", HostValue::from("litecoin")),
            ]))
            .expect_err("bad network");
        assert_eq!(err.field, "network");
    }

    #[test]
    fn union_requires_known_tag_and_variant_fields() {
        let err = SAMPLE
            .validate(&args(vec![
                ("amountMsat", HostValue::UInt(1)),
                ("target", HostValue::Map(host_map([("type", "url")]))),
            ]))
            .expect_err("missing url");
        assert_eq!(err.field, "target.url");

        let err = SAMPLE
            .validate(&args(vec![
                ("amountMsat", HostValue::UInt(1)),
                ("target", HostValue::Map(host_map([("type", "carrierPigeon")]))),
            ]))
            .expect_err("unknown variant");
        assert_eq!(err.field, "target.type");
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let normalized = SAMPLE
            .validate(&args(vec![
                ("amountMsat", HostValue::UInt(1)),
                ("extra", HostValue::Bool(true)),
            ]))
            .expect("valid");
        assert!(!normalized.contains_key("extra"));
        assert_eq!(SAMPLE.required_fields().collect::<Vec<_>>(), vec!["amountMsat"]);
    }
}
