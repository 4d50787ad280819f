//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub login whose events are reported.
    #[serde(default)]
    pub username: Option<String>,
    /// Bearer token for the GitHub API.
    #[serde(default)]
    pub token: Option<String>,
    /// Root of the GitHub REST API.
    pub api_base: String,
    /// Trailing window, in hours, of events that make the report.
    pub window_hours: u32,
    /// Whether the report starts with the date and `**Done**` lines.
    pub include_header: bool,
    /// Where the report is written.
    pub output_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("window_hours", &self.window_hours)
            .field("include_header", &self.include_header)
            .field("output_path", &self.output_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            token: None,
            api_base: eod_github::DEFAULT_API_BASE.to_string(),
            window_hours: 24,
            include_header: true,
            output_path: PathBuf::from("eod.md"),
        }
    }
}

/// Identity and credential required before the pipeline runs.
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(config_path).extract()
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Conventional GitHub variables, then EOD_* overrides
        figment = figment.merge(
            Env::raw()
                .only(&["GITHUB_USERNAME", "GITHUB_TOKEN"])
                .map(|key| {
                    if key.as_str().eq_ignore_ascii_case("GITHUB_USERNAME") {
                        "username".into()
                    } else {
                        "token".into()
                    }
                }),
        );
        figment.merge(Env::prefixed("EOD_"))
    }

    /// Returns the username and token, or fails if either is missing or blank.
    pub fn credentials(&self) -> Result<Credentials> {
        let username = non_blank(self.username.as_deref());
        let token = non_blank(self.token.as_deref());
        let (Some(username), Some(token)) = (username, token) else {
            bail!("Please set the GITHUB_USERNAME and GITHUB_TOKEN environment variables.");
        };
        Ok(Credentials {
            username: username.to_string(),
            token: token.to_string(),
        })
    }

    /// The reporting window as a duration.
    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.window_hours))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Returns the platform-specific config directory for eod.
///
/// On Linux: `~/.config/eod`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("eod"))
}
