//! Version tokens as they appear in `version_added` / `version_removed`
//!
//! The dataset encodes a token as one of:
//! - `null`  -> Unknown
//! - `false` -> Never
//! - `true`  -> AlwaysSupported
//! - `"12"`  -> SupportedSince("12")
//! - `"≤12"` -> SupportedSinceAtMost("12")

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Prefix marking a ranged (approximate) version.
pub const RANGED_PREFIX: char = '≤';

/// A single `version_added` / `version_removed` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionToken {
    /// `null`: support status is not known
    Unknown,
    /// `false`: never supported
    Never,
    /// `true`: supported, version not recorded
    AlwaysSupported,
    /// Supported since an exact release
    SupportedSince(String),
    /// Supported since at most this release (`"≤X"`)
    SupportedSinceAtMost(String),
}

impl VersionToken {
    /// Parses a version string, recognising the ranged prefix.
    pub fn from_version_str(s: &str) -> Self {
        match s.strip_prefix(RANGED_PREFIX) {
            Some(payload) => VersionToken::SupportedSinceAtMost(payload.to_string()),
            None => VersionToken::SupportedSince(s.to_string()),
        }
    }

    /// Returns the release version this token points at, if any.
    ///
    /// Ranged tokens return their payload without the prefix.
    pub fn version(&self) -> Option<&str> {
        match self {
            VersionToken::SupportedSince(v) | VersionToken::SupportedSinceAtMost(v) => Some(v),
            _ => None,
        }
    }

    /// True for `Unknown`, `Never` and `AlwaysSupported`.
    pub fn is_sentinel(&self) -> bool {
        self.version().is_none()
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self, VersionToken::SupportedSinceAtMost(_))
    }

    /// Truthiness as used by the dataset's own tooling: versions and `true`
    /// are set, `false` and `null` are not.
    pub fn is_set(&self) -> bool {
        !matches!(self, VersionToken::Unknown | VersionToken::Never)
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionToken::Unknown => write!(f, "null"),
            VersionToken::Never => write!(f, "false"),
            VersionToken::AlwaysSupported => write!(f, "true"),
            VersionToken::SupportedSince(v) => write!(f, "{}", v),
            VersionToken::SupportedSinceAtMost(v) => write!(f, "{}{}", RANGED_PREFIX, v),
        }
    }
}

impl<'de> Deserialize<'de> for VersionToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum TokenFormat {
            Flag(bool),
            Version(String),
        }

        let value = Option::<TokenFormat>::deserialize(deserializer)?;
        Ok(match value {
            None => VersionToken::Unknown,
            Some(TokenFormat::Flag(true)) => VersionToken::AlwaysSupported,
            Some(TokenFormat::Flag(false)) => VersionToken::Never,
            Some(TokenFormat::Version(s)) => VersionToken::from_version_str(&s),
        })
    }
}
