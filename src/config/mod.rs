//! Configuration module for the admin client.
//!
//! All configuration is loaded from environment variables with sensible defaults.
//! A single API origin and a single asset origin are shared by every resource
//! type.

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::errors::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:4000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content API
    pub api_url: Url,
    /// Base URL that attachment references are resolved against
    pub asset_url: Url,
    /// Bearer token handed to the static credential provider
    pub api_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_url = parse_url(
            "RBF_API_URL",
            &env::var("RBF_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        )?;

        let asset_url = match env::var("RBF_ASSET_URL") {
            Ok(raw) => parse_url("RBF_ASSET_URL", &raw)?,
            Err(_) => api_url.clone(),
        };

        let api_token = env::var("RBF_API_TOKEN").ok().filter(|t| !t.is_empty());

        let timeout = match env::var("RBF_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_level = env::var("RBF_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_url,
            asset_url,
            api_token,
            timeout,
            log_level,
        })
    }

    /// Configuration pointing both origins at `api_url`, with defaults for
    /// everything else.
    pub fn for_api(api_url: Url) -> Self {
        Self {
            asset_url: api_url.clone(),
            api_url,
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: "info".to_string(),
        }
    }
}

/// Parse a base URL, normalizing it to end with `/` so relative joins keep
/// any path prefix.
pub fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        var,
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            var,
            reason: format!("{} cannot be used as a base URL", raw),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            var: "RBF_TIMEOUT_SECS",
            value: raw.to_string(),
        }),
    }
}
