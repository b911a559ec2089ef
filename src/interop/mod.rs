//! Interop statistics
//!
//! Answers "which subset of the tracked browsers supported each feature as
//! of date D?" for every release date, and counts features per subset.
//!
//! Pipeline:
//! 1. `collect_features`: normalize raw compat entries per browser
//! 2. `InteropAggregator::new`: resolve every (feature, browser) pair once
//! 3. `snapshot_at`: compare resolved versions against one cutoff date
//! 4. `time_series`: tally snapshots over every cutoff date
//!
//! Side reports share the resolved features: `data_quality`,
//! `release_additions` and `missing_only_in`.

mod aggregator;
mod errors;
mod feature;
mod gaps;
mod permutation;
mod quality;
mod releases;
mod snapshot;

pub use aggregator::{build_time_series, CancelToken, InteropAggregator, TimeSeries, TimeSeriesRow};
pub use errors::{InteropError, InteropResult};
pub use feature::{collect_features, resolve_features, Feature, ResolvedFeature};
pub use gaps::missing_only_in;
pub use permutation::{PermutationTally, Permutations, KEY_SEPARATOR, MAX_TRACKED_BROWSERS};
pub use quality::{data_quality, no_release_counts, DataQuality, SupportQuality, VersionStats};
pub use releases::{release_additions, ReleaseAddition};
pub use snapshot::{snapshot_at, snapshot_from_resolved, InteropSnapshot, SnapshotEntry};
