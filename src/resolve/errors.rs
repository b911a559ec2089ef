//! Resolution errors
//!
//! Both variants are fatal:
//! - UnknownVersion: dataset integrity violation, continuing would corrupt
//!   aggregate statistics
//! - EmptyRecordSet: caller contract violation (normalization bug upstream)

use thiserror::Error;

/// Result type for resolution
pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Version '{version}' not in {browser} release timeline")]
    UnknownVersion { browser: String, version: String },

    #[error("Resolution invoked with no support records")]
    EmptyRecordSet,
}

impl ResolveError {
    pub fn unknown_version(browser: impl Into<String>, version: impl Into<String>) -> Self {
        ResolveError::UnknownVersion {
            browser: browser.into(),
            version: version.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::UnknownVersion { .. } => "COMPAT_UNKNOWN_VERSION",
            ResolveError::EmptyRecordSet => "COMPAT_EMPTY_RECORD_SET",
        }
    }

    pub fn is_fatal(&self) -> bool {
        true
    }
}
