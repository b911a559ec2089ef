//! Observable events
//!
//! Every log line the crate emits is one of these, with a stable code.

use std::fmt;

/// Observable events during a statistics run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Loading
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Dataset document parsed
    DatasetLoaded,
    /// Release catalog converted to timelines
    CatalogLoaded,
    /// A release date could not be parsed; release treated as undated
    InvalidReleaseDate,

    // Resolution
    /// A browser's support value could not be normalized
    MalformedRecord,
    /// Records disagree on sentinels; precedence policy applied
    SentinelConflict,
    /// All features resolved for all tracked browsers
    ResolutionComplete,
    /// Version missing from a release timeline (FATAL)
    IntegrityViolation,

    // Aggregation
    /// A resolved release has no date
    UndatedRelease,
    /// One cutoff date tallied
    CutoffProcessed,
    /// Time series built
    TimeSeriesComplete,
    /// Data-quality totals computed
    QualityComplete,
    /// Run cancelled between cutoff dates
    RunCancelled,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::InvalidReleaseDate => "INVALID_RELEASE_DATE",

            Event::MalformedRecord => "MALFORMED_RECORD",
            Event::SentinelConflict => "SENTINEL_CONFLICT",
            Event::ResolutionComplete => "RESOLUTION_COMPLETE",
            Event::IntegrityViolation => "INTEGRITY_VIOLATION",

            Event::UndatedRelease => "UNDATED_RELEASE",
            Event::CutoffProcessed => "CUTOFF_PROCESSED",
            Event::TimeSeriesComplete => "TIME_SERIES_COMPLETE",
            Event::QualityComplete => "QUALITY_COMPLETE",
            Event::RunCancelled => "RUN_CANCELLED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::IntegrityViolation)
    }

    /// Returns true for recoverable data problems worth a warning
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::InvalidReleaseDate
                | Event::MalformedRecord
                | Event::SentinelConflict
                | Event::UndatedRelease
                | Event::RunCancelled
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
