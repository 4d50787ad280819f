//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// End-of-day activity digest.
///
/// Reads your recent public GitHub events and writes a markdown summary of
/// reviews, new issues, new pull requests and pushed commits.
#[derive(Debug, Parser)]
#[command(name = "eod", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch events and write the report (the default).
    Report(ReportArgs),

    /// Show the resolved configuration.
    Config,
}

/// Overrides for a single report run.
#[derive(Debug, Default, Args)]
pub struct ReportArgs {
    /// Only include events from the last N hours.
    #[arg(long, value_name = "N")]
    pub window_hours: Option<u32>,

    /// Omit the date and "Done" lines.
    #[arg(long)]
    pub no_header: bool,

    /// Write the report to this path instead of eod.md.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also print the report to stdout.
    #[arg(short, long)]
    pub print: bool,
}
