//! CLI module for compat-interop
//!
//! Provides command-line interface for:
//! - interop: Browser-subset time series (CSV)
//! - quality: Data-quality percentages (markdown)
//! - releases: Features added per release of one browser (CSV)
//! - gaps: Features missing only in one browser

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, DataArgs};
pub use commands::{gaps, init_logging, interop, quality, releases, run, run_command};
pub use config::{check_catalog, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_paths, write_quality_table, write_release_additions, write_time_series};
