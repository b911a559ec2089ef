//! Version resolution engine
//!
//! Reduces a browser's ordered support records to the single release in
//! which the feature became available in its standard form.
//!
//! # Precedence
//!
//! 1. Flagged, prefixed, renamed and removed records are discarded
//! 2. Any surviving version string wins; the earliest release is returned
//! 3. No records at all is a caller bug (`EmptyRecordSet`)
//! 4. Everything discarded means `NeverSupported`
//! 5. Sentinels only: `AlwaysSupported` > `NeverSupported` > `Unknown`
//!
//! Step 5 is a fixed policy for datasets whose records disagree on
//! sentinels. Such inputs are reported through `Resolution::sentinel_conflict`
//! so callers can flag them for review.

use std::fmt;

use super::errors::{ResolveError, ResolveResult};
use crate::support::{SupportRecord, VersionToken};
use crate::timeline::ReleaseTimeline;

/// Resolved "added" state of one (feature, browser) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionAdded {
    /// Added in this release (canonical timeline version)
    AtVersion(String),
    AlwaysSupported,
    NeverSupported,
    Unknown,
}

impl VersionAdded {
    /// True if the result cannot be placed on a calendar.
    pub fn is_undatable(&self) -> bool {
        matches!(self, VersionAdded::AlwaysSupported | VersionAdded::Unknown)
    }

    /// True if the browser supports the feature in some release.
    pub fn is_supported(&self) -> bool {
        matches!(self, VersionAdded::AtVersion(_) | VersionAdded::AlwaysSupported)
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            VersionAdded::AtVersion(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for VersionAdded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionAdded::AtVersion(v) => write!(f, "{}", v),
            VersionAdded::AlwaysSupported => write!(f, "true"),
            VersionAdded::NeverSupported => write!(f, "false"),
            VersionAdded::Unknown => write!(f, "null"),
        }
    }
}

/// Resolution result plus review diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub added: VersionAdded,
    /// More than one distinct sentinel survived filtering
    pub sentinel_conflict: bool,
}

/// Resolves the version in which a feature was added.
pub fn resolve_added(
    records: &[SupportRecord],
    timeline: &ReleaseTimeline,
) -> ResolveResult<VersionAdded> {
    resolve_detailed(records, timeline).map(|r| r.added)
}

/// Like `resolve_added`, also reporting sentinel conflicts.
pub fn resolve_detailed(
    records: &[SupportRecord],
    timeline: &ReleaseTimeline,
) -> ResolveResult<Resolution> {
    if records.is_empty() {
        return Err(ResolveError::EmptyRecordSet);
    }

    let mut earliest: Option<(usize, &str)> = None;
    let mut saw_always = false;
    let mut saw_never = false;
    let mut saw_unknown = false;

    for record in records {
        if record.is_non_standard() || record.is_removed() {
            continue;
        }

        match &record.added {
            VersionToken::SupportedSince(version) | VersionToken::SupportedSinceAtMost(version) => {
                let index = timeline.position_of(version).ok_or_else(|| {
                    ResolveError::unknown_version(timeline.browser(), version.as_str())
                })?;
                if earliest.map_or(true, |(e, _)| index < e) {
                    earliest = Some((index, version.as_str()));
                }
            }
            VersionToken::AlwaysSupported => saw_always = true,
            VersionToken::Never => saw_never = true,
            VersionToken::Unknown => saw_unknown = true,
        }
    }

    if let Some((index, version)) = earliest {
        let release = timeline
            .release_at(index)
            .ok_or_else(|| ResolveError::unknown_version(timeline.browser(), version))?;
        return Ok(Resolution {
            added: VersionAdded::AtVersion(release.version.clone()),
            sentinel_conflict: false,
        });
    }

    let distinct = [saw_always, saw_never, saw_unknown]
        .iter()
        .filter(|seen| **seen)
        .count();

    let added = if saw_always {
        VersionAdded::AlwaysSupported
    } else if saw_never {
        VersionAdded::NeverSupported
    } else if saw_unknown {
        VersionAdded::Unknown
    } else {
        // every record was discarded
        VersionAdded::NeverSupported
    };

    Ok(Resolution {
        added,
        sentinel_conflict: distinct > 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Release;

    fn timeline() -> ReleaseTimeline {
        ReleaseTimeline::build(
            "chrome",
            ["1", "5", "8", "9", "10", "37"]
                .iter()
                .map(|v| Release::new(*v, None)),
        )
        .unwrap()
    }

    fn at(v: &str) -> VersionAdded {
        VersionAdded::AtVersion(v.to_string())
    }

    #[test]
    fn test_single_version() {
        let result = resolve_added(&[SupportRecord::since("10")], &timeline()).unwrap();
        assert_eq!(result, at("10"));
    }

    #[test]
    fn test_flagged_record_ignored() {
        let records = vec![
            SupportRecord::since("5").with_flag(),
            SupportRecord::since("8"),
        ];
        assert_eq!(resolve_added(&records, &timeline()).unwrap(), at("8"));
    }

    #[test]
    fn test_prefixed_and_renamed_ignored() {
        let records = vec![
            SupportRecord::since("10"),
            SupportRecord::since("1").with_prefix("webkit"),
            SupportRecord::since("5").with_alternative_name("webkitThing"),
        ];
        assert_eq!(resolve_added(&records, &timeline()).unwrap(), at("10"));
    }

    #[test]
    fn test_earliest_by_version_order_not_list_order() {
        let records = vec![SupportRecord::since("10"), SupportRecord::since("9")];
        assert_eq!(resolve_added(&records, &timeline()).unwrap(), at("9"));
    }

    #[test]
    fn test_ranged_resolves_to_payload() {
        let records = vec![SupportRecord::added(VersionToken::from_version_str("≤37"))];
        assert_eq!(resolve_added(&records, &timeline()).unwrap(), at("37"));
    }

    #[test]
    fn test_removed_record_ignored() {
        let records = vec![
            SupportRecord::since("1").with_removed(VersionToken::SupportedSince("5".into())),
            SupportRecord::since("10"),
        ];
        assert_eq!(resolve_added(&records, &timeline()).unwrap(), at("10"));

        let not_removed = vec![SupportRecord::since("1").with_removed(VersionToken::Never)];
        assert_eq!(resolve_added(&not_removed, &timeline()).unwrap(), at("1"));
    }

    #[test]
    fn test_sentinels() {
        let t = timeline();
        assert_eq!(
            resolve_added(&[SupportRecord::added(VersionToken::AlwaysSupported)], &t).unwrap(),
            VersionAdded::AlwaysSupported
        );
        assert_eq!(
            resolve_added(&[SupportRecord::added(VersionToken::Never)], &t).unwrap(),
            VersionAdded::NeverSupported
        );
        assert_eq!(
            resolve_added(&[SupportRecord::added(VersionToken::Unknown)], &t).unwrap(),
            VersionAdded::Unknown
        );
    }

    #[test]
    fn test_unknown_version_is_error() {
        let err = resolve_added(&[SupportRecord::since("99")], &timeline()).unwrap_err();
        assert_eq!(err, ResolveError::unknown_version("chrome", "99"));
    }

    #[test]
    fn test_errors_and_results_carry_version_strings() {
        let err = resolve_added(
            &[SupportRecord::added(VersionToken::from_version_str("≤99"))],
            &timeline(),
        )
        .unwrap_err();
        assert_eq!(err, ResolveError::unknown_version("chrome", "99"));

        let records = vec![
            SupportRecord::added(VersionToken::from_version_str("≤37")),
            SupportRecord::since("10"),
        ];
        let resolution = resolve_detailed(&records, &timeline()).unwrap();
        assert_eq!(resolution.added.version(), Some("10"));
    }

    #[test]
    fn test_unknown_version_in_discarded_record_is_ignored() {
        let records = vec![SupportRecord::since("99").with_flag(), SupportRecord::since("8")];
        assert_eq!(resolve_added(&records, &timeline()).unwrap(), at("8"));
    }

    #[test]
    fn test_empty_record_set() {
        assert_eq!(
            resolve_added(&[], &timeline()).unwrap_err(),
            ResolveError::EmptyRecordSet
        );
    }

    #[test]
    fn test_all_filtered_is_never() {
        let records = vec![SupportRecord::since("5").with_flag()];
        assert_eq!(
            resolve_added(&records, &timeline()).unwrap(),
            VersionAdded::NeverSupported
        );
    }

    #[test]
    fn test_sentinel_precedence_and_conflict() {
        let t = timeline();
        let records = vec![
            SupportRecord::added(VersionToken::Unknown),
            SupportRecord::added(VersionToken::Never),
            SupportRecord::added(VersionToken::AlwaysSupported),
        ];
        let r = resolve_detailed(&records, &t).unwrap();
        assert_eq!(r.added, VersionAdded::AlwaysSupported);
        assert!(r.sentinel_conflict);

        let records = vec![
            SupportRecord::added(VersionToken::Unknown),
            SupportRecord::added(VersionToken::Never),
        ];
        let r = resolve_detailed(&records, &t).unwrap();
        assert_eq!(r.added, VersionAdded::NeverSupported);
        assert!(r.sentinel_conflict);

        let records = vec![
            SupportRecord::added(VersionToken::Never),
            SupportRecord::added(VersionToken::Never),
        ];
        assert!(!resolve_detailed(&records, &t).unwrap().sentinel_conflict);
    }

    #[test]
    fn test_version_beats_sentinels() {
        let records = vec![
            SupportRecord::added(VersionToken::AlwaysSupported),
            SupportRecord::since("9"),
        ];
        assert_eq!(resolve_added(&records, &timeline()).unwrap(), at("9"));
    }

    #[test]
    fn test_deterministic() {
        let t = timeline();
        let records = vec![
            SupportRecord::since("10"),
            SupportRecord::since("5").with_flag(),
            SupportRecord::added(VersionToken::Unknown),
        ];
        let first = resolve_added(&records, &t).unwrap();
        for _ in 0..100 {
            assert_eq!(resolve_added(&records, &t).unwrap(), first);
        }
    }
}
