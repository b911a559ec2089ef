//! Permutation aggregator
//!
//! Turns snapshots over every cutoff date into a time series of subset
//! tallies. Cutoff dates are the distinct release dates of the tracked
//! browsers, ascending.
//!
//! Resolution does not depend on the date, so `InteropAggregator` resolves
//! each (feature, browser) pair once and only repeats the date comparison
//! per cutoff.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::errors::{InteropError, InteropResult};
use super::feature::{resolve_features, Feature, ResolvedFeature};
use super::permutation::{PermutationTally, Permutations};
use super::snapshot::{snapshot_from_resolved, InteropSnapshot};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::timeline::TimelineSet;

/// Cooperative cancellation flag, checked between cutoff dates.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Tally for one cutoff date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    pub tally: PermutationTally,
    /// Features left out because a browser's timing is unknowable
    pub incomplete: usize,
    /// Features with at least one undated release
    pub undated: usize,
}

/// Tallies for every cutoff date, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeries {
    pub permutations: Permutations,
    pub rows: Vec<TimeSeriesRow>,
}

impl TimeSeries {
    pub fn row_at(&self, date: NaiveDate) -> Option<&TimeSeriesRow> {
        self.rows
            .binary_search_by(|row| row.date.cmp(&date))
            .ok()
            .map(|i| &self.rows[i])
    }
}

/// Builds the time series from a snapshot producer.
///
/// Cancellation is checked before each date; a cancelled run returns
/// `Cancelled` and no partial series.
pub fn build_time_series<F>(
    cutoffs: &[NaiveDate],
    mut producer: F,
    permutations: &Permutations,
    cancel: &CancelToken,
) -> InteropResult<TimeSeries>
where
    F: FnMut(NaiveDate) -> InteropResult<InteropSnapshot>,
{
    let mut rows = Vec::with_capacity(cutoffs.len());

    for &date in cutoffs {
        if cancel.is_cancelled() {
            let done = rows.len().to_string();
            log_event_with_fields(Event::RunCancelled, &[("completed_dates", done.as_str())]);
            return Err(InteropError::Cancelled);
        }

        let snapshot = producer(date)?;
        let tally = snapshot.tally(permutations)?;

        let shown = date.to_string();
        let total = tally.total().to_string();
        Logger::trace(
            Event::CutoffProcessed.as_str(),
            &[("date", shown.as_str()), ("tallied", total.as_str())],
        );

        rows.push(TimeSeriesRow {
            date,
            tally,
            incomplete: snapshot.incomplete_count(),
            undated: snapshot.undated_count(),
        });
    }

    let count = rows.len().to_string();
    log_event_with_fields(Event::TimeSeriesComplete, &[("dates", count.as_str())]);

    Ok(TimeSeries {
        permutations: permutations.clone(),
        rows,
    })
}

/// Resolution cache plus tracked-browser configuration for one run.
#[derive(Debug, Clone)]
pub struct InteropAggregator<'a> {
    permutations: Permutations,
    timelines: &'a TimelineSet,
    resolved: Vec<ResolvedFeature>,
}

impl<'a> InteropAggregator<'a> {
    /// Resolves every feature for the tracked browsers.
    ///
    /// Fails on the first integrity violation, or if a tracked browser has
    /// no release timeline.
    pub fn new<S: AsRef<str>>(
        features: &[Feature],
        timelines: &'a TimelineSet,
        browsers: &[S],
    ) -> InteropResult<Self> {
        let permutations = Permutations::new(browsers)?;
        for browser in permutations.browsers() {
            timelines.get(browser)?;
        }
        let resolved = resolve_features(features, permutations.browsers(), timelines)?;

        Ok(Self {
            permutations,
            timelines,
            resolved,
        })
    }

    pub fn permutations(&self) -> &Permutations {
        &self.permutations
    }

    pub fn resolved(&self) -> &[ResolvedFeature] {
        &self.resolved
    }

    /// Distinct release dates of the tracked browsers, ascending.
    pub fn cutoff_dates(&self) -> InteropResult<Vec<NaiveDate>> {
        Ok(self.timelines.cutoff_dates(self.permutations.browsers())?)
    }

    pub fn snapshot_at(&self, cutoff: NaiveDate) -> InteropResult<InteropSnapshot> {
        snapshot_from_resolved(cutoff, &self.resolved, self.timelines)
    }

    /// Time series over every cutoff date.
    pub fn time_series(&self, cancel: &CancelToken) -> InteropResult<TimeSeries> {
        let cutoffs = self.cutoff_dates()?;
        build_time_series(
            &cutoffs,
            |date| self.snapshot_at(date),
            &self.permutations,
            cancel,
        )
    }
}
