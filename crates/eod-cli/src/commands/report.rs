//! Report command for generating the end-of-day digest.
//!
//! This module implements `eod report`: fetch the event feed, fold it into an
//! activity log, render markdown and overwrite the output file.

use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use eod_core::{ActivityLog, LogEntry, RawEvent, collect_activity};
use eod_github::Client;

use crate::Config;
use crate::cli::ReportArgs;

const SEPARATOR: &str = "----------------------------------------";

/// Settings for one report run after applying command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub window: Duration,
    pub include_header: bool,
    pub output_path: PathBuf,
    pub print: bool,
}

impl ReportOptions {
    pub fn resolve(config: &Config, args: &ReportArgs) -> Self {
        let window_hours = args.window_hours.unwrap_or(config.window_hours);
        Self {
            window: Duration::hours(i64::from(window_hours)),
            include_header: config.include_header && !args.no_header,
            output_path: args
                .output
                .clone()
                .unwrap_or_else(|| config.output_path.clone()),
            print: args.print,
        }
    }
}

// ========== Rendering ==========

/// Renders the activity log as markdown.
///
/// Output depends only on the log, the date and the header flag.
pub fn format_report(log: &ActivityLog, today: NaiveDate, include_header: bool) -> String {
    let mut output = String::new();

    if include_header {
        writeln!(output, "**{}**", today.format("%Y-%m-%d")).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Done**").unwrap();
        writeln!(output).unwrap();
    }

    for entry in log.entries() {
        match entry {
            LogEntry::Simple(text) => {
                writeln!(output, "- {text}").unwrap();
            }
            LogEntry::CommitGroup { repo, branches } => {
                for group in branches {
                    writeln!(output, "- Committed changes to _{repo}#{}_:", group.branch).unwrap();
                    for message in &group.messages {
                        writeln!(output, "  - {message}").unwrap();
                    }
                }
            }
        }
    }

    output
}

/// Runs the in-memory part of the pipeline over an already fetched batch.
pub fn generate_report(
    events: &[RawEvent],
    now: DateTime<Utc>,
    today: NaiveDate,
    options: &ReportOptions,
) -> String {
    let log = collect_activity(events, now, options.window);
    format_report(&log, today, options.include_header)
}

// ========== Fetching and Output ==========

/// Fetches events, degrading any failure to an empty batch.
fn fetch_or_empty<W: Write>(
    writer: &mut W,
    client: &Client,
    username: &str,
) -> Result<Vec<RawEvent>> {
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    match runtime.block_on(client.fetch_events(username)) {
        Ok(events) => {
            tracing::info!(count = events.len(), "fetched events");
            Ok(events)
        }
        Err(err) => {
            tracing::warn!(%err, "failed to fetch events, reporting no activity");
            writeln!(writer, "An error occurred while fetching events: {err}")?;
            Ok(Vec::new())
        }
    }
}

/// Overwrites `path` with the rendered report.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: Write>(writer: &mut W, config: &Config, args: &ReportArgs) -> Result<()> {
    let credentials = config.credentials()?;
    let options = ReportOptions::resolve(config, args);
    tracing::debug!(?options, "resolved report options");

    writeln!(
        writer,
        "Logging GitHub activities for {}...",
        credentials.username
    )?;

    let client = Client::new(credentials.token)
        .context("failed to create GitHub client")?
        .with_base_url(config.api_base.clone());
    let events = fetch_or_empty(writer, &client, &credentials.username)?;

    let report = generate_report(&events, Utc::now(), Local::now().date_naive(), &options);
    write_report(&options.output_path, &report)?;

    if options.print {
        writeln!(writer, "{SEPARATOR}")?;
        write!(writer, "{report}")?;
        writeln!(writer, "{SEPARATOR}")?;
    }
    writeln!(
        writer,
        "Activities logged to {}.",
        options.output_path.display()
    )?;

    Ok(())
}
