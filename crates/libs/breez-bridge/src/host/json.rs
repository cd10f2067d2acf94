use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::bridge::Bridge;
use crate::dispatcher::CallResult;
use crate::error::{HostError, ValidationError, ValidationReason};
use crate::value::{HostMap, HostValue};

/// Bridge adapter for hosts that exchange JSON text.
///
/// Results arrive as JSON documents; failures as a `{"kind", "message"}`
/// object. Byte fields travel as arrays of numbers in both directions.
#[derive(Clone)]
pub struct JsonHost {
    bridge: Arc<Bridge>,
}

impl JsonHost {
    pub fn new(bridge: Arc<Bridge>) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Starts `operation` with `json_args` (an object, or empty text for none).
    pub fn call<F>(&self, operation: &str, json_args: &str, callback: F)
    where
        F: FnOnce(Result<String, String>) + Send + 'static,
    {
        match parse_args(operation, json_args) {
            Ok(args) => {
                self.bridge.call_with(operation, args, move |result| callback(render(result)))
            }
            Err(err) => callback(render(Err(err))),
        }
    }

    /// Blocking variant of [`JsonHost::call`] for hosts without an event loop.
    pub fn call_blocking(&self, operation: &str, json_args: &str) -> Result<String, String> {
        match parse_args(operation, json_args) {
            Ok(args) => render(self.bridge.call(operation, args).wait()),
            Err(err) => render(Err(err)),
        }
    }

    /// Delivers each event as a JSON object with a `type` field.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.bridge
            .subscribe(Arc::new(move |event: HostValue| callback(event.to_json().to_string())));
    }

    pub fn unsubscribe(&self) {
        self.bridge.unsubscribe();
    }
}

fn parse_args(operation: &str, json_args: &str) -> Result<HostMap, HostError> {
    if json_args.trim().is_empty() {
        return Ok(HostMap::new());
    }
    let parsed: JsonValue = serde_json::from_str(json_args).map_err(|err| {
        let reason = ValidationReason::Constraint(format!("invalid JSON: {err}"));
        ValidationError::new("args", operation, reason)
    })?;
    match HostValue::from(parsed) {
        HostValue::Map(map) => Ok(map),
        other => Err(ValidationError::new(
            "args",
            operation,
            ValidationReason::WrongShape { expected: "map", found: other.shape_name() },
        )
        .into()),
    }
}

fn render(result: CallResult) -> Result<String, String> {
    result
        .map(|value| value.to_json().to_string())
        .map_err(|err| err.to_host_value().to_json().to_string())
}
