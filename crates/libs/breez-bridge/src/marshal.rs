use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::error::{BridgeError, HostError, ValidationError};
use crate::schema::Schema;
use crate::value::{to_host_value, HostMap, HostValue};

/// A typed request that can be built from host arguments.
pub trait Request: DeserializeOwned + Serialize + Send + 'static {
    fn schema() -> &'static Schema;
}

/// Binds request types to their static schemas.
macro_rules! impl_request {
    ($($ty:ty => $schema:expr),* $(,)?) => {
        $(
            impl $crate::marshal::Request for $ty {
                fn schema() -> &'static $crate::schema::Schema {
                    &$schema
                }
            }
        )*
    };
}
pub(crate) use impl_request;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MarshalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl From<MarshalError> for HostError {
    fn from(err: MarshalError) -> Self {
        match err {
            MarshalError::Validation(err) => err.into(),
            MarshalError::Bridge(err) => err.into(),
        }
    }
}

impl MarshalError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Bridge(_) => None,
        }
    }
}

/// Validates host arguments against `R`'s schema and builds the typed request.
pub fn marshal<R: Request>(args: &HostMap) -> Result<R, MarshalError> {
    let schema = R::schema();
    let normalized = schema.validate(args)?;
    HostValue::Map(normalized)
        .decode::<R>()
        .map_err(|err| BridgeError::schema_mismatch(schema.name, err).into())
}

/// Converts a core result into its host form.
pub fn unmarshal<T: Serialize + ?Sized>(value: &T) -> Result<HostValue, BridgeError> {
    Ok(to_host_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationReason;
    use crate::schema::{FieldSpec, Shape};
    use crate::value::host_map;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct TipRequest {
        amount_msat: u64,
        note: Option<String>,
    }

    static TIP_REQUEST: Schema = Schema {
        name: "TipRequest",
        fields: &[
            FieldSpec::required("amountMsat", Shape::U64),
            FieldSpec::optional("note", Shape::Str),
        ],
    };

    // Schema says optional string, struct says required integer.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct DriftedRequest {
        note: u32,
    }

    static DRIFTED_REQUEST: Schema =
        Schema { name: "DriftedRequest", fields: &[FieldSpec::optional("note", Shape::Str)] };

    impl_request! {
        TipRequest => TIP_REQUEST,
        DriftedRequest => DRIFTED_REQUEST,
    }

    #[test]
    fn marshal_builds_typed_request() {
        let args =
            host_map([("amountMsat", HostValue::Float(42.0)), ("ignored", HostValue::Bool(true))]);
        let request: TipRequest = marshal(&args).expect("valid tip");
        assert_eq!(request, TipRequest { amount_msat: 42, note: None });
    }

    #[test]
    fn marshal_reports_missing_field_with_schema_name() {
        let err = marshal::<TipRequest>(&HostMap::new()).expect_err("missing amount");
        let validation = err.validation().expect("validation failure");
        assert_eq!(validation.field, "amountMsat");
        assert_eq!(validation.operation, "TipRequest");
        assert_eq!(validation.reason, ValidationReason::Missing);
    }

    #[test]
    fn schema_and_struct_drift_is_a_bridge_error() {
        let err = marshal::<DriftedRequest>(&HostMap::new()).expect_err("drift");
        assert!(matches!(err, MarshalError::Bridge(BridgeError::SchemaMismatch { .. })));
        assert_eq!(HostError::from(err).kind(), "Bridge");
    }

    #[test]
    fn unmarshal_is_structural_inverse_of_marshal() {
        let request = TipRequest { amount_msat: 7, note: Some("tip".to_owned()) };
        let value = unmarshal(&request).expect("encode tip");
        let args = value.as_map().expect("map").clone();
        assert_eq!(marshal::<TipRequest>(&args).expect("decode tip"), request);
    }
}
