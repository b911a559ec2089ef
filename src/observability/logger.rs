//! Structured logger
//!
//! - One event code per line
//! - Explicit severity levels
//! - Fields rendered as a JSON object with sorted keys, so identical inputs
//!   produce identical lines
//!
//! Lines are emitted as `tracing` events; the binary decides where they go.

use std::fmt;

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-item detail
    Trace = 0,
    /// Normal progress
    Info = 1,
    /// Recoverable data problems
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Run aborts
    Fatal = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let fields = render_fields(fields);
        match severity {
            Severity::Trace => tracing::trace!(code = event, fields = %fields),
            Severity::Info => tracing::info!(code = event, fields = %fields),
            Severity::Warn => tracing::warn!(code = event, fields = %fields),
            Severity::Error => tracing::error!(code = event, fields = %fields),
            Severity::Fatal => tracing::error!(code = event, fatal = true, fields = %fields),
        }
    }

    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }
}

/// Renders fields as a JSON object. Keys come out sorted; a repeated key
/// keeps its last value.
pub(crate) fn render_fields(fields: &[(&str, &str)]) -> String {
    let map: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    Value::Object(map).to_string()
}
