//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit status. Errors from
//! the core keep their own code in the message.

use std::fmt;
use std::io;

use crate::dataset::DatasetError;
use crate::interop::InteropError;
use crate::timeline::TimelineError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, files)
    IoError,
    /// Dataset could not be loaded
    DatasetError,
    /// Statistics run failed
    RunError,
    /// Run stopped on request
    Cancelled,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "COMPAT_CLI_CONFIG_ERROR",
            Self::IoError => "COMPAT_CLI_IO_ERROR",
            Self::DatasetError => "COMPAT_CLI_DATASET_ERROR",
            Self::RunError => "COMPAT_CLI_RUN_ERROR",
            Self::Cancelled => "COMPAT_CLI_CANCELLED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Dataset error
    pub fn dataset_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::DatasetError, msg)
    }

    /// Run error
    pub fn run_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::RunError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<DatasetError> for CliError {
    fn from(e: DatasetError) -> Self {
        Self::dataset_error(format!("[{}] {}", e.code(), e))
    }
}

impl From<TimelineError> for CliError {
    fn from(e: TimelineError) -> Self {
        Self::run_error(format!("[{}] {}", e.code(), e))
    }
}

impl From<InteropError> for CliError {
    fn from(e: InteropError) -> Self {
        match e {
            InteropError::Cancelled => Self::new(CliErrorCode::Cancelled, e.to_string()),
            _ => Self::run_error(format!("[{}] {}", e.code(), e)),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("tracked_browsers must not be empty");
        assert_eq!(
            err.to_string(),
            "COMPAT_CLI_CONFIG_ERROR: tracked_browsers must not be empty"
        );
    }

    #[test]
    fn test_interop_error_keeps_inner_code() {
        let err = CliError::from(InteropError::UntrackedBrowser("edge".into()));
        assert_eq!(err.code(), &CliErrorCode::RunError);
        assert!(err.message().contains("COMPAT_UNTRACKED_BROWSER"));

        let cancelled = CliError::from(InteropError::Cancelled);
        assert_eq!(cancelled.code_str(), "COMPAT_CLI_CANCELLED");
    }
}
