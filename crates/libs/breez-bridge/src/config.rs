use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read bridge settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse bridge settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid bridge setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

/// Runtime settings of a bridge instance.
///
/// Missing keys fall back to the defaults, so an empty document is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    /// Async worker threads of the owned runtime.
    pub worker_threads: usize,
    /// Upper bound on concurrently running core calls.
    pub max_blocking_threads: usize,
    pub thread_name: String,
    pub event_thread_name: String,
    /// How long teardown waits for the event worker to drain.
    pub shutdown_grace_ms: u64,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            worker_threads: 2,
            max_blocking_threads: 64,
            thread_name: "breez-bridge-call".to_owned(),
            event_thread_name: "breez-bridge-events".to_owned(),
            shutdown_grace_ms: 1_000,
        }
    }
}

impl BridgeSettings {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_threads == 0 {
            return Err(ConfigError::invalid("worker_threads", "must be at least 1"));
        }
        if self.max_blocking_threads == 0 {
            return Err(ConfigError::invalid("max_blocking_threads", "must be at least 1"));
        }
        if self.thread_name.trim().is_empty() {
            return Err(ConfigError::invalid("thread_name", "must not be empty"));
        }
        if self.event_thread_name.trim().is_empty() {
            return Err(ConfigError::invalid("event_thread_name", "must not be empty"));
        }
        Ok(())
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = BridgeSettings::from_toml("").expect("empty settings");
        assert_eq!(settings, BridgeSettings::default());
    }

    #[test]
    fn partial_document_overrides_named_keys() {
        let settings = BridgeSettings::from_toml(
            r#"
            max_blocking_threads = 8
            event_thread_name = "wallet-events"
            "#,
        )
        .expect("partial settings");
        assert_eq!(settings.max_blocking_threads, 8);
        assert_eq!(settings.event_thread_name, "wallet-events");
        assert_eq!(settings.worker_threads, 2);
    }

    #[test]
    fn zero_threads_are_rejected() {
        let err = BridgeSettings::from_toml("worker_threads = 0").expect_err("zero workers");
        assert!(matches!(err, ConfigError::Invalid { field: "worker_threads", .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = BridgeSettings::from_toml("worker_threads = \"many\"").expect_err("wrong type");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
