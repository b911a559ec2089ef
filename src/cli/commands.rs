//! CLI command implementations
//!
//! Every command follows the same sequence:
//! 1. Load and validate configuration
//! 2. Load the dataset and check configured browsers against its catalog
//! 3. Walk the requested subtree (or the configured entry points)
//! 4. Compute the report and write it to the given writer
//!
//! Commands write only to `out`; diagnostics go through `tracing` to stderr.

use std::io::{self, Write};

use tracing_subscriber::EnvFilter;

use crate::dataset::Dataset;
use crate::interop::{
    collect_features, data_quality, missing_only_in, release_additions, resolve_features,
    CancelToken, Feature, InteropAggregator,
};

use super::args::{Command, DataArgs};
use super::config::{check_catalog, Config};
use super::errors::{CliError, CliResult};
use super::io::{write_paths, write_quality_table, write_release_additions, write_time_series};

/// Loaded inputs for one command
struct RunContext {
    config: Config,
    dataset: Dataset,
    sections: Vec<String>,
}

impl RunContext {
    fn prepare(args: &DataArgs) -> CliResult<Self> {
        let config = Config::load(args.config.as_deref())?;
        let dataset = Dataset::load(&args.data)?;

        let sections = match &args.subtree {
            Some(subtree) => vec![subtree.clone()],
            None => config.entry_points.clone(),
        };

        Ok(Self {
            config,
            dataset,
            sections,
        })
    }

    /// Normalized features below the selected sections, for `browsers`
    fn features(&self, browsers: &[String]) -> CliResult<Vec<Feature>> {
        let entries = self.dataset.tree.entries_in(&self.sections)?;
        Ok(collect_features(entries, browsers))
    }
}

/// Install the stderr log subscriber.
///
/// A second call (as in tests) leaves the first subscriber in place.
pub fn init_logging(level: &str) -> CliResult<()> {
    let filter = EnvFilter::try_new(format!("compat_interop={}", level))
        .map_err(|e| CliError::config_error(format!("Invalid log level '{}': {}", level, e)))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
    Ok(())
}

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    init_logging(&cli.log_level)?;
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Interop { args } => interop(&args, &CancelToken::new(), &mut out),
        Command::Quality { args } => quality(&args, &mut out),
        Command::Releases { args, browser } => releases(&args, &browser, &mut out),
        Command::Gaps { args, browser } => gaps(&args, &browser, &mut out),
    }
}

/// Interop time series over every release date of the tracked browsers
pub fn interop<W: Write>(args: &DataArgs, cancel: &CancelToken, out: &mut W) -> CliResult<()> {
    let ctx = RunContext::prepare(args)?;
    let tracked = &ctx.config.tracked_browsers;
    check_catalog("tracked_browsers", tracked, &ctx.dataset.timelines)?;

    let features = ctx.features(tracked)?;
    let aggregator = InteropAggregator::new(&features, &ctx.dataset.timelines, tracked)?;
    let series = aggregator.time_series(cancel)?;

    write_time_series(out, &series)
}

/// Data-quality table for the quality browsers
pub fn quality<W: Write>(args: &DataArgs, out: &mut W) -> CliResult<()> {
    let ctx = RunContext::prepare(args)?;
    let browsers = &ctx.config.quality_browsers;
    check_catalog("quality_browsers", browsers, &ctx.dataset.timelines)?;

    let features = ctx.features(browsers)?;
    let report = data_quality(&features, browsers);

    write_quality_table(out, args.subtree.as_deref(), &report)
}

/// Per-release additions for one browser
pub fn releases<W: Write>(args: &DataArgs, browser: &str, out: &mut W) -> CliResult<()> {
    let ctx = RunContext::prepare(args)?;
    let timeline = ctx.dataset.timelines.get(browser)?;

    let browsers = vec![browser.to_string()];
    let features = ctx.features(&browsers)?;
    let resolved = resolve_features(&features, &browsers, &ctx.dataset.timelines)?;
    let rows = release_additions(&resolved, timeline)?;

    write_release_additions(out, &rows)
}

/// Features every other tracked browser supports but `browser` never does
pub fn gaps<W: Write>(args: &DataArgs, browser: &str, out: &mut W) -> CliResult<()> {
    let ctx = RunContext::prepare(args)?;
    let tracked = &ctx.config.tracked_browsers;
    check_catalog("tracked_browsers", tracked, &ctx.dataset.timelines)?;

    let features = ctx.features(tracked)?;
    let aggregator = InteropAggregator::new(&features, &ctx.dataset.timelines, tracked)?;
    let paths = missing_only_in(browser, aggregator.resolved(), aggregator.permutations())?;

    write_paths(out, &paths)
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn dataset() -> serde_json::Value {
        json!({
            "browsers": {
                "chrome": { "releases": {
                    "1": { "release_date": "2020-01-01" },
                    "2": { "release_date": "2020-06-01" }
                } },
                "firefox": { "releases": {
                    "1": { "release_date": "2020-03-01" }
                } }
            },
            "api": {
                "A": { "__compat": { "support": {
                    "chrome": { "version_added": "1" },
                    "firefox": { "version_added": "1" }
                } } },
                "B": { "__compat": { "support": {
                    "chrome": { "version_added": "2" },
                    "firefox": { "version_added": false }
                } } }
            }
        })
    }

    fn setup(temp_dir: &TempDir) -> DataArgs {
        let data = temp_dir.path().join("data.json");
        fs::write(&data, dataset().to_string()).unwrap();

        let config = temp_dir.path().join("compat.json");
        let value = json!({
            "tracked_browsers": ["chrome", "firefox"],
            "quality_browsers": ["chrome", "firefox"],
            "entry_points": ["api"]
        });
        fs::write(&config, value.to_string()).unwrap();

        DataArgs {
            data,
            config: Some(config),
            subtree: None,
        }
    }

    fn output<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> CliResult<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_interop_csv() {
        let temp_dir = TempDir::new().unwrap();
        let args = setup(&temp_dir);

        let text = output(|out| interop(&args, &CancelToken::new(), out));
        assert_eq!(
            text,
            "date,chrome+firefox,chrome,firefox\n\
             2020-01-01,0,1,0\n\
             2020-03-01,1,0,0\n\
             2020-06-01,1,1,0\n"
        );
    }

    #[test]
    fn test_interop_cancelled() {
        let temp_dir = TempDir::new().unwrap();
        let args = setup(&temp_dir);
        let cancel = CancelToken::new();
        cancel.cancel();

        let mut buf = Vec::new();
        let err = interop(&args, &cancel, &mut buf).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::Cancelled);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_quality_table() {
        let temp_dir = TempDir::new().unwrap();
        let args = setup(&temp_dir);

        let text = output(|out| quality(&args, out));
        assert!(text.contains("| total | 100.00% | 0.00% | 0.00% | 0.00% |"));
        assert!(text.contains("| firefox | 100.00% |"));
    }

    #[test]
    fn test_releases_csv() {
        let temp_dir = TempDir::new().unwrap();
        let args = setup(&temp_dir);

        let text = output(|out| releases(&args, "chrome", out));
        assert_eq!(
            text,
            "version,date,added,cumulative\n1,2020-01-01,1,1\n2,2020-06-01,1,2\n"
        );
    }

    #[test]
    fn test_gaps() {
        let temp_dir = TempDir::new().unwrap();
        let args = setup(&temp_dir);

        assert_eq!(output(|out| gaps(&args, "firefox", out)), "api.B\n");
        assert_eq!(output(|out| gaps(&args, "chrome", out)), "");
    }

    #[test]
    fn test_subtree_selects_section() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = setup(&temp_dir);
        args.subtree = Some("api.A".to_string());

        let text = output(|out| gaps(&args, "firefox", out));
        assert_eq!(text, "");

        args.subtree = Some("css".to_string());
        let err = quality(&args, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::DatasetError);
        assert!(err.message().contains("COMPAT_UNKNOWN_SUBTREE"));
    }

    #[test]
    fn test_default_config_needs_catalog_browsers() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = setup(&temp_dir);
        args.config = None;

        let err = interop(&args, &CancelToken::new(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
        assert!(err.message().contains("safari"));
    }

    #[test]
    fn test_missing_dataset() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = setup(&temp_dir);
        args.data = temp_dir.path().join("absent.json");

        let err = quality(&args, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::DatasetError);
    }

    #[test]
    fn test_unknown_version_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let args = setup(&temp_dir);
        let mut doc = dataset();
        doc["api"]["A"]["__compat"]["support"]["firefox"]["version_added"] = json!("7");
        fs::write(&args.data, doc.to_string()).unwrap();

        let err = interop(&args, &CancelToken::new(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::RunError);
        assert!(err.message().contains("api.A"));
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(init_logging("not a level!").is_err());
    }
}
