//! Interop statistics errors
//!
//! Everything here aborts the run except `Cancelled`, which is a clean stop
//! requested by the caller.

use thiserror::Error;

use crate::resolve::ResolveError;
use crate::timeline::TimelineError;

/// Result type for interop operations
pub type InteropResult<T> = Result<T, InteropError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteropError {
    #[error("{path} [{browser}]: {source}")]
    Resolve {
        path: String,
        browser: String,
        #[source]
        source: ResolveError,
    },

    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error("Tally key '{0}' is not an enumerated browser subset")]
    UnknownPermutation(String),

    #[error("At least one tracked browser is required")]
    NoBrowsers,

    #[error("Browser '{0}' listed more than once")]
    DuplicateBrowser(String),

    #[error("{count} tracked browsers exceeds the maximum of {max}")]
    TooManyBrowsers { count: usize, max: usize },

    #[error("Browser '{0}' is not tracked")]
    UntrackedBrowser(String),

    #[error("Run cancelled")]
    Cancelled,
}

impl InteropError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            InteropError::Resolve { source, .. } => source.code(),
            InteropError::Timeline(e) => e.code(),
            InteropError::UnknownPermutation(_) => "COMPAT_UNKNOWN_PERMUTATION",
            InteropError::NoBrowsers => "COMPAT_NO_BROWSERS",
            InteropError::DuplicateBrowser(_) => "COMPAT_DUPLICATE_BROWSER",
            InteropError::TooManyBrowsers { .. } => "COMPAT_TOO_MANY_BROWSERS",
            InteropError::UntrackedBrowser(_) => "COMPAT_UNTRACKED_BROWSER",
            InteropError::Cancelled => "COMPAT_CANCELLED",
        }
    }

    pub fn is_fatal(&self) -> bool {
        !matches!(self, InteropError::Cancelled)
    }
}
