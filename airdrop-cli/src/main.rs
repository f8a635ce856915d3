//! Airdrop Hunter - browse airdrop opportunities and track your farming
//!
//! Thin shell over `airdrop-core`: parses arguments, sets up logging and
//! renders engine results.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use airdrop_core::config::{HunterConfig, HunterPaths, PathOverrides};

mod commands;
mod render;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "airdrops",
    about = "Browse crypto airdrop opportunities and track your farming progress",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Override the airdrop catalog file
    #[clap(long, global = true)]
    catalog: Option<PathBuf>,

    /// Override the tracking ledger file
    #[clap(long, global = true)]
    tracking_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List active and upcoming airdrops
    #[clap(visible_alias = "ls")]
    List {
        /// confirmed, likely, possible, testnet, mainnet, usage, easy, medium, hard,
        /// or any text to match against project id/name
        #[clap(long)]
        filter: Option<String>,

        /// value, deadline, difficulty, name or confidence
        #[clap(long)]
        sort: Option<String>,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show detailed information about an airdrop
    #[clap(visible_aliases = ["info", "detail"])]
    Show {
        /// Project id or name (partial matches allowed)
        project: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Add an airdrop to your tracking list
    #[clap(visible_aliases = ["add", "follow"])]
    Track {
        /// Project id or name (partial matches allowed)
        project: String,

        /// Initial status (defaults to the configured status, "farming")
        #[clap(long)]
        status: Option<String>,
    },

    /// Remove an airdrop from your tracking list
    #[clap(visible_aliases = ["remove", "unfollow"])]
    Untrack {
        /// Project id or name (partial matches allowed)
        project: String,
    },

    /// Update progress or status of a tracked airdrop
    Update {
        /// Project id or name (partial matches allowed)
        project: String,

        /// Progress percentage
        #[clap(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: Option<u8>,

        /// New status (interested, farming, completed, claimed, ...)
        #[clap(long)]
        status: Option<String>,
    },

    /// Show your tracked airdrops and farming progress
    #[clap(visible_aliases = ["portfolio", "tracking"])]
    Status {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },
}

/// Initialize tracing from --log-level. Logs go to stderr, output to stdout.
fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let config = HunterConfig::load()?;
    let overrides = PathOverrides {
        catalog_file: cli.catalog,
        tracking_file: cli.tracking_file,
    };
    let app = commands::App::new(HunterPaths::resolve(&overrides, &config), config);

    match cli.command {
        Command::List { filter, sort, json } => {
            app.list(filter.as_deref(), sort.as_deref(), json)
        }
        Command::Show { project, json } => app.show(&project, json),
        Command::Track { project, status } => app.track(&project, status.as_deref()),
        Command::Untrack { project } => app.untrack(&project),
        Command::Update {
            project,
            progress,
            status,
        } => app.update(&project, progress, status),
        Command::Status { json } => app.status(json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_aliases_parse() {
        let cli = Cli::try_parse_from(["airdrops", "ls", "--filter", "easy"]).unwrap();
        assert!(matches!(cli.command, Command::List { filter: Some(ref f), .. } if f == "easy"));

        let cli = Cli::try_parse_from(["airdrops", "follow", "monad"]).unwrap();
        assert!(matches!(cli.command, Command::Track { ref project, .. } if project == "monad"));

        let cli = Cli::try_parse_from(["airdrops", "portfolio"]).unwrap();
        assert!(matches!(cli.command, Command::Status { json: false }));
    }

    #[test]
    fn test_progress_is_range_checked() {
        assert!(Cli::try_parse_from(["airdrops", "update", "poly", "--progress", "100"]).is_ok());
        assert!(Cli::try_parse_from(["airdrops", "update", "poly", "--progress", "101"]).is_err());
        assert!(Cli::try_parse_from(["airdrops", "update", "poly", "--progress", "-1"]).is_err());
    }

    #[test]
    fn test_global_path_overrides() {
        let cli = Cli::try_parse_from([
            "airdrops",
            "status",
            "--catalog",
            "/tmp/airdrops.json",
            "--tracking-file",
            "/tmp/tracking.json",
        ])
        .unwrap();

        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/airdrops.json")));
        assert_eq!(cli.tracking_file, Some(PathBuf::from("/tmp/tracking.json")));
    }
}
