//! Semantic version ordering for browser release strings
//!
//! Release versions are dotted strings ("3.6", "10", "12.1", "TP").
//! Comparison is segment-wise: numeric segments compare as numbers, text
//! segments compare lexically and sort after numbers. Missing trailing
//! segments compare as zero, so "10" == "10.0" for ordering purposes.
//! A leading "≤" is ignored.

use std::cmp::Ordering;

use crate::support::RANGED_PREFIX;

/// One dot-separated version segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Segment {
    Num(u64),
    Text(String),
}

/// Parsed, totally ordered version key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionKey {
    segments: Vec<Segment>,
}

impl VersionKey {
    pub fn parse(version: &str) -> Self {
        let trimmed = version.trim().trim_start_matches(RANGED_PREFIX);
        let segments = trimmed
            .split('.')
            .map(|part| match part.parse::<u64>() {
                Ok(n) => Segment::Num(n),
                Err(_) => Segment::Text(part.to_string()),
            })
            .collect();
        Self { segments }
    }
}

const ZERO: Segment = Segment::Num(0);

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).unwrap_or(&ZERO);
            let b = other.segments.get(i).unwrap_or(&ZERO);
            match a.cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares two version strings.
///
/// Versions that compare equal by segments ("1" vs "1.0") fall back to the
/// raw string so the order stays total.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    VersionKey::parse(a)
        .cmp(&VersionKey::parse(b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_not_lexical() {
        assert_eq!(compare_versions("9", "10"), Ordering::Less);
        assert_eq!(compare_versions("10", "9"), Ordering::Greater);
        assert_eq!(compare_versions("3.6", "3.10"), Ordering::Less);
    }

    #[test]
    fn test_ranged_prefix_ignored() {
        assert_eq!(
            VersionKey::parse("≤37").cmp(&VersionKey::parse("37")),
            Ordering::Equal
        );
        assert_eq!(compare_versions("≤18", "79"), Ordering::Less);
    }

    #[test]
    fn test_missing_segments_are_zero() {
        assert_eq!(VersionKey::parse("10").cmp(&VersionKey::parse("10.0")), Ordering::Equal);
        assert_eq!(compare_versions("10", "10.0.1"), Ordering::Less);
    }

    #[test]
    fn test_text_after_numbers() {
        assert_eq!(compare_versions("15", "TP"), Ordering::Less);
        assert_eq!(compare_versions("1.preview", "1.5"), Ordering::Greater);
    }

    #[test]
    fn test_sort_is_total() {
        let mut versions = vec!["10", "1.0", "9", "1", "12.1", "3.1", "TP", "10.0"];
        versions.sort_by(|a, b| compare_versions(a, b));
        assert_eq!(versions, vec!["1", "1.0", "3.1", "9", "10", "10.0", "12.1", "TP"]);
    }
}
