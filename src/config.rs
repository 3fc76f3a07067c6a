//! Configuration management for the Docgate client.

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_BASE_URL;
use crate::error::{DocgateError, Result};
use crate::ratelimit::WindowUnit;

/// Main configuration for the submission client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the registration service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Length of the rate limiting window
    #[serde(default = "default_window_unit")]
    pub window_unit: WindowUnit,

    /// Maximum submissions per window
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            window_unit: default_window_unit(),
            requests_per_window: default_requests_per_window(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_window_unit() -> WindowUnit {
    WindowUnit::Minute
}

fn default_requests_per_window() -> usize {
    10
}

impl ClientConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_yaml::from_str(&contents)
            .map_err(|e| DocgateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce a working submitter.
    pub fn validate(&self) -> Result<()> {
        if self.requests_per_window == 0 {
            return Err(DocgateError::Config(
                "requests_per_window must be greater than 0".to_string(),
            ));
        }
        if self.base_url.is_empty() {
            return Err(DocgateError::Config("base_url must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_registration_service() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.window_unit, WindowUnit::Minute);
        assert_eq!(config.requests_per_window, 10);
    }

    #[test]
    fn test_parse_partial_yaml_fills_defaults() {
        let config: ClientConfig =
            serde_yaml::from_str("window_unit: second\nrequests_per_window: 3\n").unwrap();
        assert_eq!(config.window_unit, WindowUnit::Second);
        assert_eq!(config.requests_per_window, 3);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = ClientConfig {
            requests_per_window: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(DocgateError::Config(_))));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let config = ClientConfig {
            base_url: String::new(),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(DocgateError::Config(_))));
    }
}
