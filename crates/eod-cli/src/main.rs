use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use eod_cli::commands::{config, report};
use eod_cli::{Cli, Commands, Config, ReportArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let loaded = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(config = ?loaded, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Commands::Report(args)) => report::run(&mut stdout, &loaded, args)?,
        Some(Commands::Config) => config::run(&mut stdout, &loaded)?,
        None => report::run(&mut stdout, &loaded, &ReportArgs::default())?,
    }

    Ok(())
}
