//! End-of-day digest CLI library.
//!
//! This crate provides the CLI interface for the digest.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ReportArgs};
pub use config::{Config, Credentials};
