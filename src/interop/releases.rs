//! Per-release additions for one browser
//!
//! For each release in timeline order: how many features were first
//! supported in it, and the running total.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::errors::{InteropError, InteropResult};
use super::feature::ResolvedFeature;
use crate::resolve::VersionAdded;
use crate::timeline::ReleaseTimeline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAddition {
    pub version: String,
    pub date: Option<NaiveDate>,
    pub added: usize,
    pub cumulative: usize,
}

/// Counts features added in each release of `timeline`.
///
/// Every feature in `resolved` must have been resolved for the timeline's
/// browser.
pub fn release_additions(
    resolved: &[ResolvedFeature],
    timeline: &ReleaseTimeline,
) -> InteropResult<Vec<ReleaseAddition>> {
    let browser = timeline.browser();
    let mut per_version: HashMap<&str, usize> = HashMap::new();

    for feature in resolved {
        match feature.get(browser) {
            Some(VersionAdded::AtVersion(version)) => {
                *per_version.entry(version.as_str()).or_insert(0) += 1;
            }
            Some(_) => {}
            None => return Err(InteropError::UntrackedBrowser(browser.to_string())),
        }
    }

    let mut cumulative = 0;
    Ok(timeline
        .releases()
        .iter()
        .map(|release| {
            let added = per_version.get(release.version.as_str()).copied().unwrap_or(0);
            cumulative += added;
            ReleaseAddition {
                version: release.version.clone(),
                date: release.release_date,
                added,
                cumulative,
            }
        })
        .collect())
}
