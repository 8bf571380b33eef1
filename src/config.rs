//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;

/// Path appended to `--api-url` to reach the versioned API root.
pub const API_PREFIX: &str = "api/v1";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API URL `{url}`: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

#[derive(Parser, Debug)]
#[command(
    name = "billboard-console",
    version,
    about = "Manage billboards, locations and campaigns from the terminal"
)]
pub struct Cli {
    /// Server origin; `/api/v1` is appended.
    #[arg(long, env = "BILLBOARD_API_URL", default_value = "http://127.0.0.1:8000")]
    pub api_url: String,

    #[arg(long, env = "BILLBOARD_LOG_FILE", default_value = "billboard-console.log")]
    pub log_file: PathBuf,

    /// Bearer token from an earlier sign-in. Skips the sign-in page.
    #[arg(long, env = "BILLBOARD_TOKEN")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: Url,
    pub log_file: PathBuf,
    pub token: Option<String>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: cli.api_url.clone(),
            reason,
        };

        let origin = Url::parse(cli.api_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", origin.scheme())));
        }
        if origin.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }

        let raw = format!("{}/{API_PREFIX}", origin.as_str().trim_end_matches('/'));
        let api_base = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;

        let token = cli
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            api_base,
            log_file: cli.log_file,
            token,
        })
    }
}
