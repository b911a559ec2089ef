//! CLI argument definitions using clap
//!
//! Commands:
//! - compat-interop interop --data <path> [--config <path>] [SUBTREE]
//! - compat-interop quality --data <path> [--config <path>] [SUBTREE]
//! - compat-interop releases --data <path> --browser <id> [--config <path>] [SUBTREE]
//! - compat-interop gaps --data <path> --browser <id> [--config <path>] [SUBTREE]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// compat-interop - Cross-browser interoperability statistics
#[derive(Parser, Debug)]
#[command(name = "compat-interop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level for diagnostics written to stderr
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Inputs shared by every command
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Path to the compat dataset (JSON)
    #[arg(long)]
    pub data: PathBuf,

    /// Path to configuration file; defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dotted path of the subtree to report on (e.g. `api` or `css.properties`);
    /// all configured entry points when omitted
    pub subtree: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the per-date browser-subset time series as CSV
    Interop {
        #[command(flatten)]
        args: DataArgs,
    },

    /// Print data-quality percentages as a markdown table
    Quality {
        #[command(flatten)]
        args: DataArgs,
    },

    /// Print features added per release of one browser as CSV
    Releases {
        #[command(flatten)]
        args: DataArgs,

        /// Browser identifier (e.g. `firefox`)
        #[arg(long)]
        browser: String,
    },

    /// List features supported everywhere except one browser
    Gaps {
        #[command(flatten)]
        args: DataArgs,

        /// Browser identifier (e.g. `firefox`)
        #[arg(long)]
        browser: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interop_with_subtree() {
        let cli = Cli::try_parse_from([
            "compat-interop",
            "interop",
            "--data",
            "data.json",
            "api",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Command::Interop { args } => {
                assert_eq!(args.data, PathBuf::from("data.json"));
                assert_eq!(args.subtree.as_deref(), Some("api"));
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_gaps_requires_browser() {
        assert!(Cli::try_parse_from(["compat-interop", "gaps", "--data", "d.json"]).is_err());

        let cli = Cli::try_parse_from([
            "compat-interop",
            "gaps",
            "--data",
            "d.json",
            "--browser",
            "firefox",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Command::Gaps { ref browser, .. } if browser == "firefox"));
    }
}
