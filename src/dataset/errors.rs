//! Dataset loading errors

use std::io;

use thiserror::Error;

use crate::timeline::TimelineError;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset root must be a JSON object")]
    NotAnObject,

    #[error("Dataset has no 'browsers' release catalog")]
    MissingBrowsers,

    #[error("No subtree at '{0}'")]
    UnknownSubtree(String),

    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

impl DatasetError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DatasetError::Io(_) => "COMPAT_DATASET_IO",
            DatasetError::Json(_) => "COMPAT_DATASET_JSON",
            DatasetError::NotAnObject => "COMPAT_DATASET_NOT_OBJECT",
            DatasetError::MissingBrowsers => "COMPAT_DATASET_NO_BROWSERS",
            DatasetError::UnknownSubtree(_) => "COMPAT_UNKNOWN_SUBTREE",
            DatasetError::Timeline(e) => e.code(),
        }
    }

    /// A dataset that cannot be loaded or walked aborts the run. Malformed
    /// entries inside an otherwise valid document are logged instead and
    /// never reach this type.
    pub fn is_fatal(&self) -> bool {
        true
    }
}
