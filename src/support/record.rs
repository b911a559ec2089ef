//! Typed support records
//!
//! One record is one conditional statement about a browser's support of a
//! feature. A browser's entry in a `support` map holds one record or an
//! ordered list of them; the first listed is authoritative.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use super::token::VersionToken;

/// A normalized support record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportRecord {
    pub added: VersionToken,
    pub removed: Option<VersionToken>,
    pub behind_flag: bool,
    pub prefix: Option<String>,
    pub alternative_name: Option<String>,
}

impl SupportRecord {
    /// A plain record with only `added` set.
    pub fn added(added: VersionToken) -> Self {
        Self {
            added,
            removed: None,
            behind_flag: false,
            prefix: None,
            alternative_name: None,
        }
    }

    /// Shorthand for `added(SupportedSince(version))`.
    pub fn since(version: impl Into<String>) -> Self {
        Self::added(VersionToken::SupportedSince(version.into()))
    }

    pub fn with_removed(mut self, removed: VersionToken) -> Self {
        self.removed = Some(removed);
        self
    }

    pub fn with_flag(mut self) -> Self {
        self.behind_flag = true;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_alternative_name(mut self, name: impl Into<String>) -> Self {
        self.alternative_name = Some(name.into());
        self
    }

    /// True if the record describes flagged, prefixed or renamed access.
    pub fn is_non_standard(&self) -> bool {
        self.behind_flag || self.prefix.is_some() || self.alternative_name.is_some()
    }

    /// True if the record carries a removal (version string or `true`).
    pub fn is_removed(&self) -> bool {
        self.removed.as_ref().map_or(false, VersionToken::is_set)
    }

    /// True if either token is `null`.
    pub fn has_unknown(&self) -> bool {
        self.added == VersionToken::Unknown || self.removed == Some(VersionToken::Unknown)
    }

    /// True if either token is `true`.
    pub fn has_always(&self) -> bool {
        self.added == VersionToken::AlwaysSupported
            || self.removed == Some(VersionToken::AlwaysSupported)
    }

    /// True if either token is a ranged version.
    pub fn has_ranged(&self) -> bool {
        self.added.is_ranged() || self.removed.as_ref().map_or(false, VersionToken::is_ranged)
    }
}

/// Browser id -> ordered records for one feature.
pub type FeatureSupportMap = BTreeMap<String, Vec<SupportRecord>>;

/// Wire shape of a record object. Absent keys and `null` values are kept
/// apart so that `{"version_added": null}` is a sentinel, not a malformed
/// record.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(default, deserialize_with = "present_token")]
    pub version_added: Option<VersionToken>,
    #[serde(default, deserialize_with = "present_token")]
    pub version_removed: Option<VersionToken>,
    #[serde(default)]
    pub flags: Option<serde_json::Value>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub alternative_name: Option<String>,
}

fn present_token<'de, D>(deserializer: D) -> Result<Option<VersionToken>, D::Error>
where
    D: Deserializer<'de>,
{
    VersionToken::deserialize(deserializer).map(Some)
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

impl RawRecord {
    /// Converts to a typed record. Returns `None` when neither token is present.
    pub(crate) fn into_record(self) -> Option<SupportRecord> {
        if self.version_added.is_none() && self.version_removed.is_none() {
            return None;
        }
        Some(SupportRecord {
            added: self.version_added.unwrap_or(VersionToken::Unknown),
            removed: self.version_removed,
            behind_flag: self.flags.is_some(),
            prefix: non_empty(self.prefix),
            alternative_name: non_empty(self.alternative_name),
        })
    }
}
