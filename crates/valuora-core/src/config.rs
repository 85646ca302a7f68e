//! Client configuration.
//!
//! Values come from [`ClientConfig::default`], then environment variables
//! ([`ClientConfig::from_env`]), then explicit overrides applied by the CLI.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `VALUORA_API_URL` | `api_base_url` |
//! | `VALUORA_DATASET_URL` | `dataset_url` |
//! | `VALUORA_TREASURY_URL` | `treasury_url` |
//! | `VALUORA_TIMEOUT_MS` | `timeout_ms` |
//! | `VALUORA_HOME` | `data_dir` |

use std::env;
use std::path::PathBuf;

use crate::ValidationError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub dataset_url: String,
    pub treasury_url: String,
    pub timeout_ms: u64,
    pub data_dir: PathBuf,
    /// Serve every call from the bundled sample data instead of the network.
    pub offline: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            dataset_url: format!("{DEFAULT_API_BASE_URL}/static/tickers.json"),
            treasury_url: format!("{DEFAULT_API_BASE_URL}/api/v1/rates/treasury/10y"),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            data_dir: default_data_dir(),
            offline: false,
        }
    }
}

impl ClientConfig {
    /// Defaults layered with `VALUORA_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        let mut config = Self::default();

        if let Ok(url) = env::var("VALUORA_API_URL") {
            config = config.with_api_base_url(url)?;
        }
        if let Ok(url) = env::var("VALUORA_DATASET_URL") {
            config.dataset_url = validate_url(&url)?;
        }
        if let Ok(url) = env::var("VALUORA_TREASURY_URL") {
            config.treasury_url = validate_url(&url)?;
        }
        if let Some(timeout_ms) = env::var("VALUORA_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
        {
            config.timeout_ms = timeout_ms;
        }
        if let Ok(home) = env::var("VALUORA_HOME") {
            config.data_dir = PathBuf::from(home);
        }

        Ok(config)
    }

    /// Point the API at another host. Dataset and treasury URLs still on
    /// the previous base follow it.
    pub fn with_api_base_url(mut self, url: impl AsRef<str>) -> Result<Self, ValidationError> {
        let next = validate_url(url.as_ref())?;
        let previous = std::mem::replace(&mut self.api_base_url, next.clone());

        for derived in [&mut self.dataset_url, &mut self.treasury_url] {
            if let Some(path) = derived.strip_prefix(previous.as_str()) {
                *derived = format!("{next}{path}");
            }
        }

        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Absolute endpoint URL for an API path such as `/api/v1/projects/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

fn validate_url(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.is_empty());

    if !has_scheme || !has_host {
        return Err(ValidationError::InvalidUrl {
            value: value.to_owned(),
        });
    }

    Ok(trimmed.to_owned())
}

fn default_data_dir() -> PathBuf {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".valuora")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let config = ClientConfig::default()
            .with_api_base_url("https://api.valuora.test/")
            .expect("valid url");

        assert_eq!(
            config.endpoint("/api/v1/projects/"),
            "https://api.valuora.test/api/v1/projects/"
        );
    }

    #[test]
    fn derived_urls_follow_base_url() {
        let config = ClientConfig::default()
            .with_api_base_url("https://api.valuora.test")
            .expect("valid url");

        assert_eq!(
            config.dataset_url,
            "https://api.valuora.test/static/tickers.json"
        );
        assert!(config.treasury_url.starts_with("https://api.valuora.test/"));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = ClientConfig::default()
            .with_api_base_url("ftp://files.test")
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidUrl { .. }));

        assert!(ClientConfig::default().with_api_base_url("https://").is_err());
    }
}
