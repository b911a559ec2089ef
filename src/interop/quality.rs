//! Data-quality totals
//!
//! Date-independent counts of how precise each browser's data is. Every
//! (feature, browser) pair falls in exactly one category, checked in order:
//!
//! 1. `null`   - browser not listed, or any record has a `null` token
//! 2. `true`   - any record has a `true` token
//! 3. `ranged` - any record has a "≤X" token
//! 4. `real`   - everything else (exact versions and `false`)

use std::collections::BTreeMap;

use super::feature::{Feature, ResolvedFeature};
use crate::observability::{log_event_with_fields, Event};
use crate::resolve::VersionAdded;
use crate::support::SupportRecord;

/// Quality category of one (feature, browser) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportQuality {
    Unknown,
    Always,
    Ranged,
    Real,
}

impl SupportQuality {
    pub fn classify(records: Option<&[SupportRecord]>) -> Self {
        let Some(records) = records else {
            return SupportQuality::Unknown;
        };
        if records.iter().any(SupportRecord::has_unknown) {
            SupportQuality::Unknown
        } else if records.iter().any(SupportRecord::has_always) {
            SupportQuality::Always
        } else if records.iter().any(SupportRecord::has_ranged) {
            SupportQuality::Ranged
        } else {
            SupportQuality::Real
        }
    }
}

/// Category counts for one browser (or the total row).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionStats {
    pub all: u64,
    pub real: u64,
    pub ranged: u64,
    pub always: u64,
    pub unknown: u64,
}

impl VersionStats {
    pub fn add(&mut self, quality: SupportQuality) {
        self.all += 1;
        match quality {
            SupportQuality::Unknown => self.unknown += 1,
            SupportQuality::Always => self.always += 1,
            SupportQuality::Ranged => self.ranged += 1,
            SupportQuality::Real => self.real += 1,
        }
    }

    fn percent(&self, count: u64) -> f64 {
        if self.all == 0 {
            return 0.0;
        }
        count as f64 / self.all as f64 * 100.0
    }

    pub fn real_percent(&self) -> f64 {
        self.percent(self.real)
    }

    pub fn ranged_percent(&self) -> f64 {
        self.percent(self.ranged)
    }

    pub fn always_percent(&self) -> f64 {
        self.percent(self.always)
    }

    pub fn unknown_percent(&self) -> f64 {
        self.percent(self.unknown)
    }
}

/// Per-browser quality counts plus a total row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataQuality {
    /// In the order the browsers were given
    pub browsers: Vec<(String, VersionStats)>,
    pub total: VersionStats,
}

impl DataQuality {
    pub fn get(&self, browser: &str) -> Option<&VersionStats> {
        self.browsers
            .iter()
            .find(|(b, _)| b == browser)
            .map(|(_, stats)| stats)
    }
}

/// Counts quality categories over all features for `browsers`.
pub fn data_quality<S: AsRef<str>>(features: &[Feature], browsers: &[S]) -> DataQuality {
    let mut quality = DataQuality {
        browsers: browsers
            .iter()
            .map(|b| (b.as_ref().to_string(), VersionStats::default()))
            .collect(),
        total: VersionStats::default(),
    };

    for feature in features {
        for (browser, stats) in quality.browsers.iter_mut() {
            let category = SupportQuality::classify(feature.records(browser));
            stats.add(category);
            quality.total.add(category);
        }
    }

    let count = features.len().to_string();
    log_event_with_fields(Event::QualityComplete, &[("features", count.as_str())]);
    quality
}

/// Per browser, how many features resolved to `AlwaysSupported` or
/// `Unknown` and so have no fixed release.
pub fn no_release_counts(resolved: &[ResolvedFeature]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for feature in resolved {
        for (browser, added) in &feature.added {
            let count = counts.entry(browser.clone()).or_insert(0);
            if matches!(added, VersionAdded::AlwaysSupported | VersionAdded::Unknown) {
                *count += 1;
            }
        }
    }
    counts
}
