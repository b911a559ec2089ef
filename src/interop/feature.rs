//! Features and their per-browser resolution
//!
//! A `Feature` is a compat entry with its support values normalized for the
//! browsers of interest. A `ResolvedFeature` is the same feature reduced to
//! one `VersionAdded` per browser; it does not depend on any cutoff date and
//! is what the aggregator caches.

use std::collections::BTreeMap;

use super::errors::{InteropError, InteropResult};
use crate::dataset::CompatEntry;
use crate::observability::{log_event_with_fields, Event};
use crate::resolve::{resolve_detailed, Resolution, VersionAdded};
use crate::support::{normalize, FeatureSupportMap, SupportRecord};
use crate::timeline::TimelineSet;

/// A feature path with normalized support records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub path: String,
    pub support: FeatureSupportMap,
}

impl Feature {
    pub fn new(path: impl Into<String>, support: FeatureSupportMap) -> Self {
        Self {
            path: path.into(),
            support,
        }
    }

    /// Normalizes the listed browsers of a compat entry.
    ///
    /// Unlisted browsers are left out. Malformed values are logged and left
    /// out too, so both resolve as `Unknown`.
    pub fn from_entry<S: AsRef<str>>(path: &str, entry: &CompatEntry, browsers: &[S]) -> Self {
        let mut support = FeatureSupportMap::new();
        for browser in browsers {
            let browser = browser.as_ref();
            let Some(raw) = entry.raw_support(browser) else {
                continue;
            };
            match normalize(raw) {
                Ok(records) => {
                    support.insert(browser.to_string(), records);
                }
                Err(e) => {
                    let reason = e.to_string();
                    log_event_with_fields(
                        Event::MalformedRecord,
                        &[("path", path), ("browser", browser), ("reason", reason.as_str())],
                    );
                }
            }
        }
        Self::new(path, support)
    }

    pub fn records(&self, browser: &str) -> Option<&[SupportRecord]> {
        self.support.get(browser).map(Vec::as_slice)
    }

    /// Resolves the added version for one browser.
    ///
    /// A browser without records resolves to `Unknown`.
    pub fn resolve(&self, browser: &str, timelines: &TimelineSet) -> InteropResult<Resolution> {
        let Some(records) = self.records(browser) else {
            return Ok(Resolution {
                added: VersionAdded::Unknown,
                sentinel_conflict: false,
            });
        };

        let timeline = timelines.get(browser)?;
        resolve_detailed(records, timeline).map_err(|source| {
            let shown = source.to_string();
            log_event_with_fields(
                Event::IntegrityViolation,
                &[("path", self.path.as_str()), ("browser", browser), ("error", shown.as_str())],
            );
            InteropError::Resolve {
                path: self.path.clone(),
                browser: browser.to_string(),
                source,
            }
        })
    }
}

/// Builds features for `browsers` from walked compat entries.
pub fn collect_features<'a, I, S>(entries: I, browsers: &[S]) -> Vec<Feature>
where
    I: IntoIterator<Item = (String, &'a CompatEntry)>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|(path, entry)| Feature::from_entry(&path, entry, browsers))
        .collect()
}

/// A feature reduced to one `VersionAdded` per browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFeature {
    pub path: String,
    pub added: BTreeMap<String, VersionAdded>,
}

impl ResolvedFeature {
    pub fn get(&self, browser: &str) -> Option<&VersionAdded> {
        self.added.get(browser)
    }

    /// True if any browser's result cannot be placed on a calendar.
    pub fn is_undatable(&self) -> bool {
        self.added.values().any(VersionAdded::is_undatable)
    }
}

/// Resolves every feature for every browser in `browsers`.
///
/// Sentinel conflicts and releases without a date are logged once here so
/// that per-date passes stay quiet.
pub fn resolve_features<S: AsRef<str>>(
    features: &[Feature],
    browsers: &[S],
    timelines: &TimelineSet,
) -> InteropResult<Vec<ResolvedFeature>> {
    let mut resolved = Vec::with_capacity(features.len());

    for feature in features {
        let mut added = BTreeMap::new();
        for browser in browsers {
            let browser = browser.as_ref();
            let resolution = feature.resolve(browser, timelines)?;

            if resolution.sentinel_conflict {
                log_event_with_fields(
                    Event::SentinelConflict,
                    &[
                        ("path", feature.path.as_str()),
                        ("browser", browser),
                        ("resolved", resolution.added.to_string().as_str()),
                    ],
                );
            }
            if let VersionAdded::AtVersion(version) = &resolution.added {
                let timeline = timelines.get(browser)?;
                let dated = timeline
                    .position_of(version)
                    .and_then(|i| timeline.release_at(i))
                    .map_or(false, |r| r.release_date.is_some());
                if !dated {
                    log_event_with_fields(
                        Event::UndatedRelease,
                        &[
                            ("path", feature.path.as_str()),
                            ("browser", browser),
                            ("version", version.as_str()),
                        ],
                    );
                }
            }

            added.insert(browser.to_string(), resolution.added);
        }
        resolved.push(ResolvedFeature {
            path: feature.path.clone(),
            added,
        });
    }

    let count = resolved.len().to_string();
    log_event_with_fields(Event::ResolutionComplete, &[("features", count.as_str())]);
    Ok(resolved)
}
