//! Dashboard runtime configuration.
//!
//! Stored as JSON in browser local storage under [`CONFIG_STORAGE_KEY`];
//! every field is optional and falls back to its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local storage key holding a JSON [`DashboardConfig`].
pub const CONFIG_STORAGE_KEY: &str = "portwatch_config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for every REST endpoint, e.g. `/api` or `http://host:8080/api`.
    pub api_base: String,
    /// Listen addresses longer than this are shortened in the UDP tables.
    pub udp_addr_max_chars: usize,
    /// How long a copy toast stays on screen.
    pub toast_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            udp_addr_max_chars: 12,
            toast_ms: 2_000,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base.starts_with('/') || self.api_base.starts_with("http")) {
            return Err(ConfigError::Invalid(format!(
                "api_base must be a path or an http(s) URL, got {:?}",
                self.api_base
            )));
        }
        if self.udp_addr_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "udp_addr_max_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Full URL for an endpoint path such as `/services`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}
