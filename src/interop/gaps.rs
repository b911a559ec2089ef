//! Single-browser gaps
//!
//! Features that every other tracked browser supports in some release while
//! one browser never does. Not date-bounded: it reflects the latest data.

use super::errors::{InteropError, InteropResult};
use super::feature::ResolvedFeature;
use super::permutation::Permutations;
use crate::resolve::VersionAdded;

/// Paths of features missing only in `browser`.
///
/// Features with `Unknown` data for any tracked browser are skipped.
pub fn missing_only_in<'a>(
    browser: &str,
    resolved: &'a [ResolvedFeature],
    permutations: &Permutations,
) -> InteropResult<Vec<&'a str>> {
    if !permutations.is_tracked(browser) {
        return Err(InteropError::UntrackedBrowser(browser.to_string()));
    }
    if permutations.browsers().len() < 2 {
        return Ok(Vec::new());
    }

    let gaps = resolved
        .iter()
        .filter(|feature| {
            permutations.browsers().iter().all(|b| match feature.get(b) {
                Some(VersionAdded::NeverSupported) => b == browser,
                Some(added) if added.is_supported() => b != browser,
                _ => false,
            })
        })
        .map(|feature| feature.path.as_str())
        .collect();

    Ok(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn resolved(path: &str, support: &[(&str, VersionAdded)]) -> ResolvedFeature {
        let added: BTreeMap<String, VersionAdded> = support
            .iter()
            .map(|(b, a)| (b.to_string(), a.clone()))
            .collect();
        ResolvedFeature { path: path.into(), added }
    }

    fn at(v: &str) -> VersionAdded {
        VersionAdded::AtVersion(v.into())
    }

    #[test]
    fn test_missing_only_in() {
        let p = Permutations::new(&["chrome", "firefox", "safari"]).unwrap();
        let features = vec![
            resolved(
                "gap",
                &[
                    ("chrome", at("1")),
                    ("firefox", VersionAdded::NeverSupported),
                    ("safari", VersionAdded::AlwaysSupported),
                ],
            ),
            resolved(
                "two_missing",
                &[
                    ("chrome", at("1")),
                    ("firefox", VersionAdded::NeverSupported),
                    ("safari", VersionAdded::NeverSupported),
                ],
            ),
            resolved(
                "unknown",
                &[
                    ("chrome", at("1")),
                    ("firefox", VersionAdded::Unknown),
                    ("safari", at("1")),
                ],
            ),
            resolved("everywhere", &[("chrome", at("1")), ("firefox", at("1")), ("safari", at("1"))]),
        ];

        assert_eq!(missing_only_in("firefox", &features, &p).unwrap(), vec!["gap"]);
        assert!(missing_only_in("safari", &features, &p).unwrap().is_empty());
    }

    #[test]
    fn test_untracked_browser() {
        let p = Permutations::new(&["chrome", "firefox"]).unwrap();
        assert_eq!(
            missing_only_in("edge", &[], &p),
            Err(InteropError::UntrackedBrowser("edge".into()))
        );
    }
}
