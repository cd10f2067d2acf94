//! Binding bridge between the Breez core SDK and host runtimes.
//!
//! A host hands the bridge an operation name and a [`HostMap`] of arguments.
//! The bridge validates the arguments against the operation's schema, runs
//! the core call on a worker, and completes the host's [`CallHandle`] with a
//! [`HostValue`] or a [`HostError`] of the form `(kind, message)`. Core
//! events are relayed, in order, to a single registered [`EventListener`].
//!
//! - [`value`]: the host-neutral value model and its serde bridges
//! - [`schema`] / [`marshal`]: request validation and typed decoding
//! - [`operations`]: the table of host-facing operations
//! - [`events`]: event decoding and ordered delivery
//! - [`dispatcher`]: worker execution and call completion
//! - [`host`]: adapters for concrete host runtimes

pub mod backend;
mod bridge;
mod config;
pub mod dispatcher;
mod error;
pub mod events;
pub mod host;
pub mod marshal;
pub mod operations;
pub mod schema;
pub mod types;
pub mod value;

pub use backend::{CoreApi, CoreEventSink, CoreSession};
pub use bridge::Bridge;
pub use config::{BridgeSettings, ConfigError};
pub use dispatcher::{CallHandle, CallResult};
pub use error::{
    host_kind, translate, BridgeError, CoreError, HostError, ValidationError, ValidationReason,
    KIND_BRIDGE, KIND_VALIDATION,
};
pub use events::{BreezEvent, EventListener};
pub use host::JsonHost;
pub use marshal::{marshal, unmarshal, MarshalError, Request};
pub use value::{host_map, HostMap, HostValue};
