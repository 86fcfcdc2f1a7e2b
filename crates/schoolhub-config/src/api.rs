//! Backend API configuration.
//!
//! - `SCHOOLHUB_API_URL`: Base URL of the REST backend (default: `http://localhost:8000`)
//! - `SCHOOLHUB_REQUEST_TIMEOUT_SECS`: Per-request timeout in seconds (default: none)

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Requests run to completion when unset.
    pub request_timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: None,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SCHOOLHUB_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout = lookup("SCHOOLHUB_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            request_timeout,
            ..Self::new(base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ApiConfig::from_lookup(|key| match key {
            "SCHOOLHUB_API_URL" => Some("https://school.example.com/".into()),
            _ => None,
        });
        assert_eq!(config.base_url, "https://school.example.com");
    }

    #[test]
    fn test_timeout_parsing() {
        let config = ApiConfig::from_lookup(|key| match key {
            "SCHOOLHUB_REQUEST_TIMEOUT_SECS" => Some("15".into()),
            _ => None,
        });
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));

        let config = ApiConfig::from_lookup(|key| match key {
            "SCHOOLHUB_REQUEST_TIMEOUT_SECS" => Some("soon".into()),
            _ => None,
        });
        assert!(config.request_timeout.is_none());
    }
}
