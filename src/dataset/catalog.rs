//! Release catalog
//!
//! Reads `browsers.<id>.releases.<version>.release_date` into one
//! `ReleaseTimeline` per browser. Dates are `YYYY-MM-DD`; a date that does
//! not parse is logged and the release treated as undated.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::errors::DatasetResult;
use crate::observability::{log_event_with_fields, Event};
use crate::timeline::{Release, ReleaseTimeline, TimelineSet};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct BrowserDoc {
    #[serde(default)]
    releases: BTreeMap<String, ReleaseDoc>,
}

#[derive(Debug, Deserialize)]
struct ReleaseDoc {
    #[serde(default)]
    release_date: Option<String>,
}

/// Parses a catalog release date.
pub fn parse_release_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Builds timelines for every browser in a `browsers` section.
pub fn load_timelines(browsers: &Value) -> DatasetResult<TimelineSet> {
    let docs = BTreeMap::<String, BrowserDoc>::deserialize(browsers)?;

    let mut set = TimelineSet::new();
    for (browser, doc) in docs {
        let releases = doc.releases.into_iter().map(|(version, release)| {
            let release_date = release.release_date.as_deref().and_then(|raw| {
                let parsed = parse_release_date(raw);
                if parsed.is_none() {
                    log_event_with_fields(
                        Event::InvalidReleaseDate,
                        &[
                            ("browser", browser.as_str()),
                            ("version", version.as_str()),
                            ("date", raw),
                        ],
                    );
                }
                parsed
            });
            Release::new(version, release_date)
        });
        let timeline = ReleaseTimeline::build(browser.as_str(), releases.collect::<Vec<_>>())?;
        set.insert(timeline);
    }

    Ok(set)
}
