//! Config command for showing the resolved configuration.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::config::dirs_config_path;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let config_file = dirs_config_path().map(|dir| dir.join("config.toml"));

    writeln!(writer, "eod configuration")?;
    match config_file {
        Some(path) => writeln!(writer, "Config file:    {}", path.display())?,
        None => writeln!(writer, "Config file:    (none)")?,
    }
    writeln!(
        writer,
        "Username:       {}",
        config.username.as_deref().unwrap_or("(not set)")
    )?;
    writeln!(
        writer,
        "Token:          {}",
        if config.token.is_some() {
            "[REDACTED]"
        } else {
            "(not set)"
        }
    )?;
    writeln!(writer, "API base:       {}", config.api_base)?;
    writeln!(writer, "Window:         {}h", config.window_hours)?;
    writeln!(writer, "Header:         {}", config.include_header)?;
    writeln!(writer, "Output:         {}", config.output_path.display())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_command_redacts_token() {
        let config = Config {
            username: Some("octocat".to_string()),
            token: Some("ghp_secret".to_string()),
            ..Config::default()
        };
        let mut output = Vec::new();
        run(&mut output, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Username:       octocat"));
        assert!(output.contains("Token:          [REDACTED]"));
        assert!(!output.contains("ghp_secret"));
        assert!(output.contains("Window:         24h"));
    }

    #[test]
    fn config_command_reports_missing_credentials() {
        let mut output = Vec::new();
        run(&mut output, &Config::default()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Username:       (not set)"));
        assert!(output.contains("Token:          (not set)"));
    }
}
