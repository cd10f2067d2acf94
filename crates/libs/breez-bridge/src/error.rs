use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::{host_map, DecodeError, EncodeError, HostValue};

/// Host-visible kind for argument validation failures.
pub const KIND_VALIDATION: &str = "Validation";
/// Host-visible kind for bridge invariant violations.
pub const KIND_BRIDGE: &str = "Bridge";

const KIND_SUFFIXES: [&str; 2] = ["Exception", "Error"];

/// Failure categories produced by the core SDK.
///
/// The set is closed: every variant has a host mapping in [`translate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum CoreError {
    #[error("{err}")]
    Generic { err: String },

    #[error("{err}")]
    InvalidInput { err: String },

    #[error("{err}")]
    InvalidAmount { err: String },

    #[error("{err}")]
    InvalidInvoice { err: String },

    #[error("{err}")]
    InvoiceExpired { err: String },

    #[error("{err}")]
    AlreadyPaid { err: String },

    #[error("{err}")]
    InsufficientFunds { err: String },

    #[error("{err}")]
    RouteNotFound { err: String },

    #[error("{err}")]
    RouteTooExpensive { err: String },

    #[error("{err}")]
    PaymentFailed { err: String },

    #[error("{err}")]
    PaymentTimeout { err: String },

    #[error("{err}")]
    ServiceConnectivity { err: String },

    #[error("{err}")]
    NotConnected { err: String },

    #[error("{err}")]
    LnUrlError { err: String },

    #[error("{err}")]
    PersistenceError { err: String },
}

impl CoreError {
    pub fn generic(err: impl Into<String>) -> Self {
        Self::Generic { err: err.into() }
    }

    pub fn invalid_input(err: impl Into<String>) -> Self {
        Self::InvalidInput { err: err.into() }
    }

    pub fn not_connected() -> Self {
        Self::NotConnected { err: "bridge is not connected to a core session".to_owned() }
    }

    /// The variant identifier as the core names it.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Generic { .. } => "Generic",
            Self::InvalidInput { .. } => "InvalidInput",
            Self::InvalidAmount { .. } => "InvalidAmount",
            Self::InvalidInvoice { .. } => "InvalidInvoice",
            Self::InvoiceExpired { .. } => "InvoiceExpired",
            Self::AlreadyPaid { .. } => "AlreadyPaid",
            Self::InsufficientFunds { .. } => "InsufficientFunds",
            Self::RouteNotFound { .. } => "RouteNotFound",
            Self::RouteTooExpensive { .. } => "RouteTooExpensive",
            Self::PaymentFailed { .. } => "PaymentFailed",
            Self::PaymentTimeout { .. } => "PaymentTimeout",
            Self::ServiceConnectivity { .. } => "ServiceConnectivity",
            Self::NotConnected { .. } => "NotConnected",
            Self::LnUrlError { .. } => "LnUrlError",
            Self::PersistenceError { .. } => "PersistenceError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Generic { err }
            | Self::InvalidInput { err }
            | Self::InvalidAmount { err }
            | Self::InvalidInvoice { err }
            | Self::InvoiceExpired { err }
            | Self::AlreadyPaid { err }
            | Self::InsufficientFunds { err }
            | Self::RouteNotFound { err }
            | Self::RouteTooExpensive { err }
            | Self::PaymentFailed { err }
            | Self::PaymentTimeout { err }
            | Self::ServiceConnectivity { err }
            | Self::NotConnected { err }
            | Self::LnUrlError { err }
            | Self::PersistenceError { err } => err.as_str(),
        }
    }
}

/// Why a host argument was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationReason {
    Missing,
    WrongShape { expected: &'static str, found: &'static str },
    OutOfRange { expected: &'static str },
    Constraint(String),
    UnknownOperation,
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "required field is missing"),
            Self::WrongShape { expected, found } => write!(f, "expected {expected}, found {found}"),
            Self::OutOfRange { expected } => write!(f, "value does not fit {expected}"),
            Self::Constraint(message) => write!(f, "{message}"),
            Self::UnknownOperation => write!(f, "operation is not supported by this bridge"),
        }
    }
}

/// A host argument failed its schema. Raised before any core call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid argument '{field}' for {operation}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub operation: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        operation: impl Into<String>,
        reason: ValidationReason,
    ) -> Self {
        Self { field: field.into(), operation: operation.into(), reason }
    }

    pub fn unknown_operation(operation: impl Into<String>) -> Self {
        Self::new("operation", operation, ValidationReason::UnknownOperation)
    }
}

/// Internal invariant violations: the bridge and the core disagree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("schema mismatch for {operation}: {detail}")]
    SchemaMismatch { operation: String, detail: String },

    #[error("unknown event variant '{variant}'")]
    UnknownEvent { variant: String },

    #[error("malformed event payload: {detail}")]
    MalformedEvent { detail: String },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("core broke its contract in {operation}: {detail}")]
    ContractViolation { operation: String, detail: String },

    #[error("worker for {operation} panicked")]
    WorkerPanicked { operation: String },

    #[error("dispatcher runtime unavailable: {detail}")]
    Runtime { detail: String },
}

impl BridgeError {
    pub(crate) fn schema_mismatch(operation: &str, err: DecodeError) -> Self {
        Self::SchemaMismatch { operation: operation.to_owned(), detail: err.to_string() }
    }
}

/// Failure as delivered to a host: a stable `kind` plus free-form `message`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct HostError {
    pub kind: String,
    pub message: String,
    pub cause: Option<CoreError>,
}

impl HostError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: kind.into(), message: message.into(), cause: None }
    }

    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// The `{ kind, message }` map handed to hosts.
    pub fn to_host_value(&self) -> HostValue {
        HostValue::Map(host_map([
            ("kind", self.kind.clone()),
            ("message", self.message.clone()),
        ]))
    }
}

impl From<CoreError> for HostError {
    fn from(err: CoreError) -> Self {
        translate(err)
    }
}

impl From<ValidationError> for HostError {
    fn from(err: ValidationError) -> Self {
        Self::new(KIND_VALIDATION, err.to_string())
    }
}

impl From<BridgeError> for HostError {
    fn from(err: BridgeError) -> Self {
        log::error!("bridge error surfaced to host: {err}");
        Self::new(KIND_BRIDGE, err.to_string())
    }
}

/// Maps a core failure to its host form. Never fails.
pub fn translate(err: CoreError) -> HostError {
    HostError {
        kind: host_kind(err.identifier()).to_owned(),
        message: err.message().to_owned(),
        cause: Some(err),
    }
}

/// Strips trailing `Exception` / `Error` noise from a variant identifier.
///
/// A bare suffix (`"Error"`) is kept as is so the kind is never empty.
pub fn host_kind(identifier: &str) -> &str {
    let mut kind = identifier;
    loop {
        let stripped = KIND_SUFFIXES
            .iter()
            .find_map(|suffix| kind.strip_suffix(*suffix).filter(|rest| !rest.is_empty()));
        match stripped {
            Some(rest) => kind = rest,
            None => return kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_kind_strips_known_suffixes() {
        assert_eq!(host_kind("GenericException"), "Generic");
        assert_eq!(host_kind("PersistenceError"), "Persistence");
        assert_eq!(host_kind("SdkErrorException"), "Sdk");
        assert_eq!(host_kind("RouteNotFound"), "RouteNotFound");
        assert_eq!(host_kind("Error"), "Error");
        assert_eq!(host_kind("Exception"), "Exception");
    }

    #[test]
    fn translate_keeps_message_verbatim_and_wraps_cause() {
        let core = CoreError::LnUrlError { err: "callback returned 404: not found".to_owned() };
        let host = translate(core.clone());
        assert_eq!(host.kind(), "LnUrl");
        assert_eq!(host.message(), "callback returned 404: not found");
        assert_eq!(host.cause, Some(core));
    }

    #[test]
    fn every_core_variant_has_a_nonempty_kind() {
        let variants = [
            CoreError::Generic { err: String::new() },
            CoreError::InvalidInput { err: String::new() },
            CoreError::InvalidAmount { err: String::new() },
            CoreError::InvalidInvoice { err: String::new() },
            CoreError::InvoiceExpired { err: String::new() },
            CoreError::AlreadyPaid { err: String::new() },
            CoreError::InsufficientFunds { err: String::new() },
            CoreError::RouteNotFound { err: String::new() },
            CoreError::RouteTooExpensive { err: String::new() },
            CoreError::PaymentFailed { err: String::new() },
            CoreError::PaymentTimeout { err: String::new() },
            CoreError::ServiceConnectivity { err: String::new() },
            CoreError::NotConnected { err: String::new() },
            CoreError::LnUrlError { err: String::new() },
            CoreError::PersistenceError { err: String::new() },
        ];
        for variant in variants {
            let kind = translate(variant.clone()).kind;
            assert!(!kind.is_empty());
            assert!(!kind.ends_with("Error"), "{kind} kept its suffix");
            assert!(variant.identifier().starts_with(kind.as_str()));
        }
    }

    #[test]
    fn validation_error_names_field_and_operation() {
        let err = ValidationError::new("req", "PayOfferRequest", ValidationReason::Missing);
        let host = HostError::from(err.clone());
        assert_eq!(host.kind(), KIND_VALIDATION);
        assert!(host.message().contains("'req'"));
        assert!(host.message().contains("PayOfferRequest"));
        assert_eq!(host.cause, None);
        assert_eq!(err.field, "req");
    }
}
