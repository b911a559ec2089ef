//! Release timeline errors

use thiserror::Error;

/// Result type for timeline operations
pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("Unknown version '{version}' for browser '{browser}'")]
    UnknownVersion { browser: String, version: String },

    #[error("Duplicate release '{version}' for browser '{browser}'")]
    DuplicateVersion { browser: String, version: String },

    #[error("No release timeline for browser '{0}'")]
    UnknownBrowser(String),
}

impl TimelineError {
    pub fn unknown_version(browser: impl Into<String>, version: impl Into<String>) -> Self {
        TimelineError::UnknownVersion {
            browser: browser.into(),
            version: version.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TimelineError::UnknownVersion { .. } => "COMPAT_UNKNOWN_VERSION",
            TimelineError::DuplicateVersion { .. } => "COMPAT_DUPLICATE_RELEASE",
            TimelineError::UnknownBrowser(_) => "COMPAT_UNKNOWN_BROWSER",
        }
    }

    /// All timeline errors are data-integrity violations
    pub fn is_fatal(&self) -> bool {
        true
    }
}
