//! Dataset loading
//!
//! A dataset document is one JSON object:
//! - `browsers`: release catalog, one entry per browser
//! - every other key: a feature section (`api`, `css`, ...) holding nested
//!   containers with `__compat` entries
//!
//! The document is fully materialized before any statistics run; the core
//! only ever borrows from it.

mod catalog;
mod errors;
mod node;

pub use catalog::{load_timelines, parse_release_date};
pub use errors::{DatasetError, DatasetResult};
pub use node::{CompatEntry, CompatNode, CompatTree, Entries, COMPAT_KEY, PATH_SEPARATOR};

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};
use crate::timeline::TimelineSet;

/// Key of the release catalog section.
pub const BROWSERS_KEY: &str = "browsers";

/// A loaded dataset: release timelines plus the feature tree.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub timelines: TimelineSet,
    pub tree: CompatTree,
}

impl Dataset {
    /// Loads a dataset from a JSON file.
    pub fn load(path: &Path) -> DatasetResult<Self> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        let dataset = Self::from_value(&value)?;

        let shown = path.display().to_string();
        log_event_with_fields(Event::DatasetLoaded, &[("path", shown.as_str())]);
        Ok(dataset)
    }

    /// Splits an in-memory document into catalog and tree.
    pub fn from_value(value: &Value) -> DatasetResult<Self> {
        let map = value.as_object().ok_or(DatasetError::NotAnObject)?;
        let browsers = map.get(BROWSERS_KEY).ok_or(DatasetError::MissingBrowsers)?;

        let timelines = load_timelines(browsers)?;
        let count = timelines.browsers().count().to_string();
        log_event_with_fields(Event::CatalogLoaded, &[("browsers", count.as_str())]);

        let sections = map.iter().filter(|(key, _)| key.as_str() != BROWSERS_KEY);
        let root = CompatNode::from_members("", sections);

        Ok(Self {
            timelines,
            tree: CompatTree::new(root),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_splits_catalog() {
        let doc = json!({
            "browsers": {
                "chrome": { "releases": { "1": { "release_date": "2008-12-11" } } }
            },
            "api": {
                "Foo": { "__compat": { "support": { "chrome": { "version_added": "1" } } } }
            }
        });

        let dataset = Dataset::from_value(&doc).unwrap();
        assert!(dataset.timelines.contains("chrome"));
        assert!(dataset.tree.subtree("browsers").is_err());
        assert_eq!(dataset.tree.entries_in(&["api"]).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_browsers() {
        assert!(matches!(
            Dataset::from_value(&json!({ "api": {} })),
            Err(DatasetError::MissingBrowsers)
        ));
        assert!(matches!(
            Dataset::from_value(&json!([])),
            Err(DatasetError::NotAnObject)
        ));
    }
}
