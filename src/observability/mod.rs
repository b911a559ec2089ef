//! Observability
//!
//! Structured, deterministic log events. Core modules log only through
//! `log_event_with_fields` and `Logger::trace`; installing a subscriber is
//! the binary's job.
//!
//! # Usage
//!
//! ```ignore
//! use compat_interop::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::MalformedRecord, &[("path", "api.Request")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

fn severity_of(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}
