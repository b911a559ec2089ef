//! Compat tree nodes and traversal
//!
//! The dataset is an arbitrarily nested JSON object. Objects under a
//! `__compat` key are compat entries; every other object is a container.
//! Non-object values carry no compat data and are dropped while building.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::errors::{DatasetError, DatasetResult};
use crate::observability::{log_event_with_fields, Event};

/// Key marking a compat entry inside a container.
pub const COMPAT_KEY: &str = "__compat";

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// One `__compat` entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompatEntry {
    /// Browser id -> raw support value (record, record list or sentinel)
    #[serde(default)]
    pub support: Option<BTreeMap<String, Value>>,

    /// Documentation link, unused by the statistics
    #[serde(default)]
    pub mdn_url: Option<String>,
}

impl CompatEntry {
    pub fn new(support: BTreeMap<String, Value>) -> Self {
        Self {
            support: Some(support),
            mdn_url: None,
        }
    }

    /// Raw support value for `browser`, if listed.
    pub fn raw_support(&self, browser: &str) -> Option<&Value> {
        self.support.as_ref().and_then(|s| s.get(browser))
    }
}

/// Tagged tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum CompatNode {
    Leaf(CompatEntry),
    Container(BTreeMap<String, CompatNode>),
}

impl CompatNode {
    /// Builds a node from a JSON value. `path` is only used in logs.
    ///
    /// A `__compat` object that does not deserialize is logged and kept as
    /// an entry without support, so the walker skips it.
    pub fn from_value(path: &str, value: &Value) -> Self {
        match value {
            Value::Object(map) => CompatNode::from_members(path, map),
            _ => CompatNode::Container(BTreeMap::new()),
        }
    }

    /// Builds a container from object members, e.g. a filtered top level.
    pub fn from_members<'a, I>(path: &str, members: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let mut children = BTreeMap::new();
        for (key, child) in members {
            if key == COMPAT_KEY {
                let entry = CompatEntry::deserialize(child).unwrap_or_else(|e| {
                    let reason = e.to_string();
                    log_event_with_fields(
                        Event::MalformedRecord,
                        &[("path", path), ("reason", reason.as_str())],
                    );
                    CompatEntry::default()
                });
                children.insert(key.clone(), CompatNode::Leaf(entry));
            } else if child.is_object() {
                let child_path = join_path(path, key);
                children.insert(key.clone(), CompatNode::from_value(&child_path, child));
            }
        }
        CompatNode::Container(children)
    }

    /// Child node by key. Leaves have no children.
    pub fn child(&self, key: &str) -> Option<&CompatNode> {
        match self {
            CompatNode::Container(children) => children.get(key),
            CompatNode::Leaf(_) => None,
        }
    }

    /// Depth-first iterator over `(path, entry)` below this node, where
    /// `base` is this node's own path.
    pub fn entries<'a>(&'a self, base: &str) -> Entries<'a> {
        Entries {
            stack: vec![(base.to_string(), self)],
        }
    }
}

/// Depth-first compat entry iterator.
///
/// Containers yield their own `__compat` entry before their children;
/// children are visited in key order. Entries without a `support` map are
/// skipped.
pub struct Entries<'a> {
    stack: Vec<(String, &'a CompatNode)>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (String, &'a CompatEntry);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            match node {
                CompatNode::Leaf(entry) => {
                    if entry.support.is_some() {
                        return Some((path, entry));
                    }
                }
                CompatNode::Container(children) => {
                    for (key, child) in children.iter().rev() {
                        if key == COMPAT_KEY {
                            continue;
                        }
                        self.stack.push((join_path(&path, key), child));
                    }
                    // pushed last so it pops first
                    if let Some(leaf) = children.get(COMPAT_KEY) {
                        self.stack.push((path, leaf));
                    }
                }
            }
        }
        None
    }
}

/// The feature part of a dataset (everything but the release catalog).
#[derive(Debug, Clone, PartialEq)]
pub struct CompatTree {
    root: CompatNode,
}

impl CompatTree {
    pub fn new(root: CompatNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &CompatNode {
        &self.root
    }

    /// Node at a dotted path (`"api.Request"`).
    pub fn subtree(&self, path: &str) -> DatasetResult<&CompatNode> {
        path.split(PATH_SEPARATOR)
            .try_fold(&self.root, |node, key| node.child(key))
            .ok_or_else(|| DatasetError::UnknownSubtree(path.to_string()))
    }

    /// All entries below each of `sections`, in the given section order.
    ///
    /// Sections missing from the tree are an error.
    pub fn entries_in<S: AsRef<str>>(
        &self,
        sections: &[S],
    ) -> DatasetResult<Vec<(String, &CompatEntry)>> {
        let mut out = Vec::new();
        for section in sections {
            let section = section.as_ref();
            out.extend(self.subtree(section)?.entries(section));
        }
        Ok(out)
    }
}

fn join_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", base, PATH_SEPARATOR, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> CompatTree {
        let value = json!({
            "api": {
                "Request": {
                    "__compat": { "support": { "chrome": { "version_added": "42" } } },
                    "blob": {
                        "__compat": { "support": { "chrome": { "version_added": "42" } } }
                    },
                    "arrayBuffer": {
                        "__compat": { "support": { "chrome": { "version_added": "43" } } }
                    }
                },
                "Response": {
                    "__compat": { "mdn_url": "https://example.invalid/Response" }
                },
                "description": "not an object"
            },
            "css": {
                "properties": {
                    "color": { "__compat": { "support": {} } }
                }
            }
        });
        CompatTree::new(CompatNode::from_value("", &value))
    }

    #[test]
    fn test_entries_depth_first() {
        let t = tree();
        let paths: Vec<String> = t.root().entries("").map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                "api.Request",
                "api.Request.arrayBuffer",
                "api.Request.blob",
                "css.properties.color",
            ]
        );
    }

    #[test]
    fn test_entry_without_support_skipped() {
        let t = tree();
        assert!(t
            .root()
            .entries("")
            .all(|(path, _)| path != "api.Response"));
    }

    #[test]
    fn test_subtree_lookup() {
        let t = tree();
        let entries = t.entries_in(&["api.Request.blob"]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "api.Request.blob");
        assert_eq!(
            entries[0].1.raw_support("chrome"),
            Some(&json!({ "version_added": "42" }))
        );
    }

    #[test]
    fn test_sections_in_order() {
        let t = tree();
        let paths: Vec<String> = t
            .entries_in(&["css", "api"])
            .unwrap()
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(paths[0], "css.properties.color");
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn test_unknown_subtree() {
        let t = tree();
        assert!(matches!(
            t.subtree("html"),
            Err(DatasetError::UnknownSubtree(_))
        ));
        assert!(matches!(
            t.subtree("api.Request.__compat.support"),
            Err(DatasetError::UnknownSubtree(_))
        ));
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let value = json!({ "api": {
            "X": { "__compat": { "support": "chrome" } },
            "Y": { "__compat": { "support": { "chrome": { "version_added": "1" } } } }
        } });
        let node = CompatNode::from_value("", &value);

        let bad = node.child("api").and_then(|n| n.child("X")).and_then(|n| n.child(COMPAT_KEY));
        assert_eq!(bad, Some(&CompatNode::Leaf(CompatEntry::default())));

        let paths: Vec<String> = node.entries("").map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["api.Y"]);
    }
}
