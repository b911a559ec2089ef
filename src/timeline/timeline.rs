//! Per-browser release timelines
//!
//! A timeline is the ordered release history of one browser. Order is the
//! semantic version order from `version.rs`, never the catalog's key order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use super::errors::{TimelineError, TimelineResult};
use super::version::compare_versions;
use crate::support::RANGED_PREFIX;

/// One browser release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: String,
    pub release_date: Option<NaiveDate>,
}

impl Release {
    pub fn new(version: impl Into<String>, release_date: Option<NaiveDate>) -> Self {
        Self {
            version: version.into(),
            release_date,
        }
    }
}

/// Outcome of a date-bounded release lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseCheck {
    /// Released on or before the cutoff
    OnOrBefore,
    /// Released after the cutoff
    After,
    /// The release has no date and cannot satisfy any date bound
    Undated,
}

/// Ordered release history for a single browser.
#[derive(Debug, Clone)]
pub struct ReleaseTimeline {
    browser: String,
    releases: Vec<Release>,
    positions: HashMap<String, usize>,
}

impl ReleaseTimeline {
    /// Builds a timeline from an unordered release collection.
    ///
    /// Fails if the same version string appears twice.
    pub fn build(
        browser: impl Into<String>,
        releases: impl IntoIterator<Item = Release>,
    ) -> TimelineResult<Self> {
        let browser = browser.into();
        let mut releases: Vec<Release> = releases.into_iter().collect();
        releases.sort_by(|a, b| compare_versions(&a.version, &b.version));

        let mut positions = HashMap::with_capacity(releases.len());
        for (index, release) in releases.iter().enumerate() {
            if positions.insert(release.version.clone(), index).is_some() {
                return Err(TimelineError::DuplicateVersion {
                    browser,
                    version: release.version.clone(),
                });
            }
        }

        Ok(Self {
            browser,
            releases,
            positions,
        })
    }

    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// Releases in ascending version order.
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Position of `version` in the total order. Ranged versions ("≤X") are
    /// looked up by their payload.
    pub fn position_of(&self, version: &str) -> Option<usize> {
        let version = version.trim_start_matches(RANGED_PREFIX);
        self.positions.get(version).copied()
    }

    /// Release at a position returned by `position_of`.
    pub fn release_at(&self, index: usize) -> Option<&Release> {
        self.releases.get(index)
    }

    /// Whether the release containing `version` shipped on or before `cutoff`.
    pub fn date_at_or_before(&self, version: &str, cutoff: NaiveDate) -> TimelineResult<ReleaseCheck> {
        let index = self
            .position_of(version)
            .ok_or_else(|| TimelineError::unknown_version(&self.browser, version))?;

        Ok(match self.releases[index].release_date {
            None => ReleaseCheck::Undated,
            Some(date) if date <= cutoff => ReleaseCheck::OnOrBefore,
            Some(_) => ReleaseCheck::After,
        })
    }

    /// All known release dates, in version order (may repeat).
    pub fn release_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.releases.iter().filter_map(|r| r.release_date)
    }
}

/// Timelines for every browser in the release catalog.
#[derive(Debug, Clone, Default)]
pub struct TimelineSet {
    timelines: BTreeMap<String, ReleaseTimeline>,
}

impl TimelineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timeline: ReleaseTimeline) {
        self.timelines.insert(timeline.browser.clone(), timeline);
    }

    /// Timeline for `browser`, or `UnknownBrowser`.
    pub fn get(&self, browser: &str) -> TimelineResult<&ReleaseTimeline> {
        self.timelines
            .get(browser)
            .ok_or_else(|| TimelineError::UnknownBrowser(browser.to_string()))
    }

    pub fn contains(&self, browser: &str) -> bool {
        self.timelines.contains_key(browser)
    }

    pub fn browsers(&self) -> impl Iterator<Item = &str> {
        self.timelines.keys().map(String::as_str)
    }

    /// Distinct release dates across `browsers`, ascending.
    pub fn cutoff_dates<S: AsRef<str>>(&self, browsers: &[S]) -> TimelineResult<Vec<NaiveDate>> {
        let mut dates = BTreeSet::new();
        for browser in browsers {
            dates.extend(self.get(browser.as_ref())?.release_dates());
        }
        Ok(dates.into_iter().collect())
    }
}

impl FromIterator<ReleaseTimeline> for TimelineSet {
    fn from_iter<I: IntoIterator<Item = ReleaseTimeline>>(iter: I) -> Self {
        let mut set = TimelineSet::new();
        for timeline in iter {
            set.insert(timeline);
        }
        set
    }
}
