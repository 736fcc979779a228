//! Configuration module for the tutorials client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use crate::errors::ClientError;
use crate::views::Skin;

/// Base URL used when `TUTORIALS_API_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the tutorials REST API, without a trailing slash
    pub base_url: String,
    /// Transport timeout applied to every request (none if unset)
    pub timeout: Option<Duration>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Presentation skin used by the command-line front end
    pub skin: Skin,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("TUTORIALS_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&base_url)?;

        let timeout = match env::var("TUTORIALS_HTTP_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        let log_level = env::var("TUTORIALS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = match env::var("TUTORIALS_LOG_FORMAT") {
            Ok(raw) => parse_log_format(&raw)?,
            Err(_) => false,
        };

        let skin = match env::var("TUTORIALS_SKIN") {
            Ok(raw) => raw.parse()?,
            Err(_) => Skin::Plain,
        };

        Ok(Self {
            base_url,
            timeout,
            log_level,
            log_json,
            skin,
        })
    }
}

/// Validate a base URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| ClientError::Config(format!("Invalid base URL {:?}: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::Config(format!(
            "Unsupported base URL scheme: {}",
            url.scheme()
        )));
    }

    Ok(raw.trim().trim_end_matches('/').to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration, ClientError> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("Invalid timeout: {:?}", raw)))?;
    if secs == 0 {
        return Err(ClientError::Config("Timeout must be positive".to_string()));
    }
    Ok(Duration::from_secs(secs))
}

/// `json` selects structured output; `text` the default formatter.
fn parse_log_format(raw: &str) -> Result<bool, ClientError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(true),
        "text" | "" => Ok(false),
        other => Err(ClientError::Config(format!("Unknown log format: {}", other))),
    }
}
