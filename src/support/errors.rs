//! Support record errors
//!
//! Malformed records are local to one (feature, browser) pair and never
//! fatal: the caller treats that browser's support as unknown and logs it.

use thiserror::Error;

/// Result type for normalization
pub type SupportResult<T> = Result<T, SupportError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupportError {
    #[error("Malformed support record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

impl SupportError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        SupportError::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SupportError::MalformedRecord { .. } => "COMPAT_MALFORMED_RECORD",
        }
    }

    /// Malformed records degrade to unknown support
    pub fn is_fatal(&self) -> bool {
        false
    }
}
