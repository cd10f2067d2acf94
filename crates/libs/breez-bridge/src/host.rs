//! Adapters for concrete host runtimes.

mod json;

pub use json::JsonHost;
