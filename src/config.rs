//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_API_FALLBACK_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Session file location relative to `$HOME`.
pub const DEFAULT_SESSION_FILE: &str = ".luxury-scents/session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
    #[error("no session file location: set LUXURY_SESSION_FILE or HOME")]
    NoSessionPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Secondary backend address. Carried for deployments that list one;
    /// the gateway never fails over to it.
    pub fallback_url: Option<String>,
    pub timeouts: Timeouts,
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `LUXURY_API_BASE_URL`: default `http://localhost:8080/api`
    /// - `LUXURY_API_FALLBACK_URL`: default `http://localhost:8081/api`, empty disables
    /// - `LUXURY_REQUEST_TIMEOUT_SECS`: default 30
    /// - `LUXURY_CONNECT_TIMEOUT_SECS`: default 10
    /// - `LUXURY_SESSION_FILE`: default `$HOME/.luxury-scents/session.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or no session file
    /// location can be derived.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url =
            normalize_base_url(&lookup("LUXURY_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned()))?;

        let fallback_url = match lookup("LUXURY_API_FALLBACK_URL") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(normalize_base_url(&raw)?),
            None => Some(DEFAULT_API_FALLBACK_URL.to_owned()),
        };

        let timeouts = Timeouts {
            request_secs: parse_or(lookup("LUXURY_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(lookup("LUXURY_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        let session_file = match lookup("LUXURY_SESSION_FILE").filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => {
                let home = lookup("HOME").filter(|v| !v.trim().is_empty()).ok_or(ConfigError::NoSessionPath)?;
                PathBuf::from(home).join(DEFAULT_SESSION_FILE)
            }
        };

        Ok(Self { base_url, fallback_url, timeouts, session_file })
    }

    /// Replace the base URL, keeping everything else.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not an http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(raw)?;
        Ok(self)
    }
}

/// Trim whitespace and trailing slashes; require an http(s) scheme and a host.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] for anything else.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed.strip_prefix("https://").or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(rest) if !rest.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_owned())),
    }
}

fn parse_or(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
