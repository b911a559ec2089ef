//! Run configuration
//!
//! Optional JSON file. Every field has a default, so `{}` (or no file at
//! all) is a valid configuration.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::interop::MAX_TRACKED_BROWSERS;
use crate::observability::{log_event_with_fields, Event};
use crate::timeline::TimelineSet;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Browsers compared by `interop` and `gaps`
    #[serde(default = "default_tracked_browsers")]
    pub tracked_browsers: Vec<String>,

    /// Browsers listed by `quality`
    #[serde(default = "default_quality_browsers")]
    pub quality_browsers: Vec<String>,

    /// Top-level sections walked when no subtree is given
    #[serde(default = "default_entry_points")]
    pub entry_points: Vec<String>,
}

fn default_tracked_browsers() -> Vec<String> {
    to_strings(&["chrome", "firefox", "safari"])
}
fn default_quality_browsers() -> Vec<String> {
    to_strings(&[
        "chrome",
        "chrome_android",
        "edge",
        "firefox",
        "ie",
        "safari",
        "safari_ios",
        "webview_android",
    ])
}
fn default_entry_points() -> Vec<String> {
    to_strings(&["api", "css", "javascript"])
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracked_browsers: default_tracked_browsers(),
            quality_browsers: default_quality_browsers(),
            entry_points: default_entry_points(),
        }
    }
}

impl Config {
    /// Load configuration from file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let config = match path {
            None => Config::default(),
            Some(path) => {
                let content = fs::read_to_string(path)
                    .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
                serde_json::from_str(&content)
                    .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?
            }
        };

        config.validate()?;

        let tracked = config.tracked_browsers.join(",");
        log_event_with_fields(Event::ConfigLoaded, &[("tracked_browsers", tracked.as_str())]);
        Ok(config)
    }

    /// Validate list shapes; does not need the dataset
    pub fn validate(&self) -> CliResult<()> {
        validate_list("tracked_browsers", &self.tracked_browsers)?;
        validate_list("quality_browsers", &self.quality_browsers)?;
        validate_list("entry_points", &self.entry_points)?;

        if self.tracked_browsers.len() > MAX_TRACKED_BROWSERS {
            return Err(CliError::config_error(format!(
                "tracked_browsers has {} entries; at most {} are allowed",
                self.tracked_browsers.len(),
                MAX_TRACKED_BROWSERS
            )));
        }

        Ok(())
    }
}

/// Every browser in `browsers` must have a release timeline
pub fn check_catalog(field: &str, browsers: &[String], timelines: &TimelineSet) -> CliResult<()> {
    match browsers.iter().find(|b| !timelines.contains(b)) {
        Some(browser) => Err(CliError::config_error(format!(
            "{}: browser '{}' is not in the dataset's release catalog",
            field, browser
        ))),
        None => Ok(()),
    }
}

fn validate_list(field: &str, items: &[String]) -> CliResult<()> {
    if items.is_empty() {
        return Err(CliError::config_error(format!("{} must not be empty", field)));
    }

    let mut seen = HashSet::new();
    for item in items {
        if item.is_empty() {
            return Err(CliError::config_error(format!(
                "{} contains an empty name",
                field
            )));
        }
        if !seen.insert(item.as_str()) {
            return Err(CliError::config_error(format!(
                "{} lists '{}' more than once",
                field, item
            )));
        }
    }
    Ok(())
}
