//! Release timelines
//!
//! Per browser, releases ordered by semantic version with optional release
//! dates. Used to place resolved "added" versions on the calendar.
//!
//! # Invariants
//!
//! - Ordering is numeric per segment ("10" after "9")
//! - Each version appears at most once per browser
//! - An undated release never satisfies a date bound

mod errors;
mod timeline;
mod version;

pub use errors::{TimelineError, TimelineResult};
pub use timeline::{Release, ReleaseCheck, ReleaseTimeline, TimelineSet};
pub use version::{compare_versions, VersionKey};
