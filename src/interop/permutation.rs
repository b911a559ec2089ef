//! Browser subset enumeration and tallies
//!
//! For n tracked browsers there are 2^n - 1 non-empty subsets. Each subset
//! has a canonical key: its browsers in sorted order joined by `+`.
//! The enumeration is regenerated from whatever browser list is configured.
//!
//! Column order: larger subsets first, then keys in lexical order. For
//! chrome/firefox/safari:
//!
//! ```text
//! chrome+firefox+safari, chrome+firefox, chrome+safari, firefox+safari,
//! chrome, firefox, safari
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::errors::{InteropError, InteropResult};

/// Separator inside a subset key.
pub const KEY_SEPARATOR: &str = "+";

/// Upper bound on tracked browsers (2^16 - 1 subsets).
pub const MAX_TRACKED_BROWSERS: usize = 16;

/// The enumerated non-empty subsets of the tracked browsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutations {
    browsers: Vec<String>,
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl Permutations {
    pub fn new<S: AsRef<str>>(browsers: &[S]) -> InteropResult<Self> {
        if browsers.is_empty() {
            return Err(InteropError::NoBrowsers);
        }
        if browsers.len() > MAX_TRACKED_BROWSERS {
            return Err(InteropError::TooManyBrowsers {
                count: browsers.len(),
                max: MAX_TRACKED_BROWSERS,
            });
        }

        let mut sorted = BTreeSet::new();
        for browser in browsers {
            if !sorted.insert(browser.as_ref().to_string()) {
                return Err(InteropError::DuplicateBrowser(browser.as_ref().to_string()));
            }
        }
        let browsers: Vec<String> = sorted.into_iter().collect();

        let n = browsers.len();
        let mut subsets: Vec<(u32, String)> = (1u32..(1u32 << n))
            .map(|mask| {
                let members: Vec<&str> = browsers
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, b)| b.as_str())
                    .collect();
                (mask.count_ones(), members.join(KEY_SEPARATOR))
            })
            .collect();
        subsets.sort_by(|(size_a, key_a), (size_b, key_b)| {
            size_b.cmp(size_a).then_with(|| key_a.cmp(key_b))
        });

        let keys: Vec<String> = subsets.into_iter().map(|(_, key)| key).collect();
        let index = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), i))
            .collect();

        Ok(Self {
            browsers,
            keys,
            index,
        })
    }

    /// Tracked browsers, sorted.
    pub fn browsers(&self) -> &[String] {
        &self.browsers
    }

    /// Subset keys in column order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn is_tracked(&self, browser: &str) -> bool {
        self.browsers.binary_search_by(|b| b.as_str().cmp(browser)).is_ok()
    }

    /// Canonical key for a set of browsers.
    pub fn key_for(supported: &BTreeSet<String>) -> String {
        supported
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR)
    }
}

/// Count of features per browser subset for one cutoff date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermutationTally {
    counts: BTreeMap<String, u64>,
}

impl PermutationTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one feature supported by exactly `supported`.
    ///
    /// The key must be one of the enumerated subsets; anything else means
    /// the enumeration is out of sync with the tracked browsers.
    pub fn record(
        &mut self,
        permutations: &Permutations,
        supported: &BTreeSet<String>,
    ) -> InteropResult<()> {
        let key = Permutations::key_for(supported);
        if !permutations.contains(&key) {
            return Err(InteropError::UnknownPermutation(key));
        }
        *self.counts.entry(key).or_insert(0) += 1;
        Ok(())
    }

    /// Count for a subset key (0 if never recorded).
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Non-zero counts by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of features counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Adds another partial tally into this one. Merge order is irrelevant.
    pub fn merge(&mut self, other: &PermutationTally) {
        for (key, count) in &other.counts {
            *self.counts.entry(key.clone()).or_insert(0) += count;
        }
    }

    /// Counts in the column order of `permutations`.
    pub fn row(&self, permutations: &Permutations) -> Vec<u64> {
        permutations.keys().iter().map(|k| self.get(k)).collect()
    }
}
