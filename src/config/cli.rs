use crate::config::toml_config::ClientConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "formwire")]
#[command(about = "Run delete, form and cookie page actions against a live HTTP endpoint")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML file with client settings")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Base URL for relative request paths")]
    pub base_url: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the leading integer of VALUE, or 0
    ParseInt { value: String },

    /// Format a moment for a datetime-local input (defaults to now, local zone)
    DatetimeValue {
        #[arg(long, help = "RFC 3339 timestamp; its offset selects the wall clock")]
        at: Option<String>,
    },

    /// Confirm, then send DELETE to URL
    Delete {
        url: String,

        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// POST form fields to URL
    Submit {
        url: String,

        #[arg(long = "field", value_parser = parse_field, help = "name=value, repeatable")]
        fields: Vec<(String, String)>,

        #[arg(long, help = "Declared form enctype")]
        enctype: Option<String>,
    },

    /// Expire the given cookies, then navigate to LOCATION
    ClearCookies {
        location: String,

        #[arg(long, default_value = "", help = "Cookie header, e.g. \"a=1; b=2\"")]
        cookies: String,
    },
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

impl CliConfig {
    /// Client settings from `--config` (or defaults) with command-line overrides applied.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        config.validate()?;
        Ok(config)
    }
}
