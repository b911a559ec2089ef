//! Interop snapshots
//!
//! A snapshot answers, for one cutoff date: which tracked browsers had
//! shipped each feature by then?
//!
//! # Rules
//!
//! - `AtVersion(v)` counts when v's release date is on or before the cutoff
//! - `AlwaysSupported` / `Unknown` make the feature incomplete for the date;
//!   incomplete features never reach a tally
//! - `NeverSupported` contributes no browser
//! - An undated release contributes no browser and is recorded as undated

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::errors::InteropResult;
use super::feature::{resolve_features, Feature, ResolvedFeature};
use super::permutation::{PermutationTally, Permutations};
use crate::resolve::VersionAdded;
use crate::timeline::{ReleaseCheck, TimelineSet};

/// One feature at one cutoff date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// False if any tracked browser's timing is unknowable
    pub complete: bool,
    /// Browsers supporting the feature by the cutoff (empty if incomplete)
    pub supported: BTreeSet<String>,
    /// Browsers whose resolved release has no date
    pub undated: BTreeSet<String>,
}

/// Per-feature support as of one cutoff date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteropSnapshot {
    cutoff: NaiveDate,
    entries: BTreeMap<String, SnapshotEntry>,
}

impl InteropSnapshot {
    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    pub fn get(&self, path: &str) -> Option<&SnapshotEntry> {
        self.entries.get(path)
    }

    /// Entries by feature path, in path order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &SnapshotEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Features excluded from tallies as incomplete.
    pub fn incomplete_count(&self) -> usize {
        self.entries.values().filter(|e| !e.complete).count()
    }

    /// Features with at least one undated release.
    pub fn undated_count(&self) -> usize {
        self.entries.values().filter(|e| !e.undated.is_empty()).count()
    }

    /// Tallies complete features with a non-empty support set.
    pub fn tally(&self, permutations: &Permutations) -> InteropResult<PermutationTally> {
        let mut tally = PermutationTally::new();
        for entry in self.entries.values() {
            if entry.complete && !entry.supported.is_empty() {
                tally.record(permutations, &entry.supported)?;
            }
        }
        Ok(tally)
    }
}

/// Builds a snapshot from raw features, resolving every (feature, browser)
/// pair for this date.
pub fn snapshot_at<S: AsRef<str>>(
    cutoff: NaiveDate,
    features: &[Feature],
    timelines: &TimelineSet,
    browsers: &[S],
) -> InteropResult<InteropSnapshot> {
    let resolved = resolve_features(features, browsers, timelines)?;
    snapshot_from_resolved(cutoff, &resolved, timelines)
}

/// Builds a snapshot from features already resolved for the tracked
/// browsers. Only the date comparison runs here.
pub fn snapshot_from_resolved(
    cutoff: NaiveDate,
    resolved: &[ResolvedFeature],
    timelines: &TimelineSet,
) -> InteropResult<InteropSnapshot> {
    let mut entries = BTreeMap::new();

    for feature in resolved {
        let mut entry = SnapshotEntry {
            complete: !feature.is_undatable(),
            ..SnapshotEntry::default()
        };

        if entry.complete {
            for (browser, added) in &feature.added {
                let VersionAdded::AtVersion(version) = added else {
                    continue;
                };
                let check = timelines
                    .get(browser)?
                    .date_at_or_before(version, cutoff)?;
                match check {
                    ReleaseCheck::OnOrBefore => {
                        entry.supported.insert(browser.clone());
                    }
                    ReleaseCheck::Undated => {
                        entry.undated.insert(browser.clone());
                    }
                    ReleaseCheck::After => {}
                }
            }
        }

        entries.insert(feature.path.clone(), entry);
    }

    Ok(InteropSnapshot { cutoff, entries })
}
