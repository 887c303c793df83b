// File: monitor/src/config/mod.rs
pub mod manager;
use crate::constants::defaults;
use crate::errors::ConfigError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
pub use manager::ConfigManager;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,
    #[serde(default = "default_freshness_threshold_seconds")]
    pub freshness_threshold_seconds: u64,
    #[serde(default = "default_rpc_timeout_seconds")]
    pub rpc_timeout_seconds: u64,
    #[serde(default)]
    pub notification_url: String,
    #[serde(default)]
    pub notify_on_down: bool,
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

fn default_check_interval_ms() -> u64 {
    defaults::CHECK_INTERVAL_MS
}

fn default_freshness_threshold_seconds() -> u64 {
    defaults::FRESHNESS_THRESHOLD_SECONDS
}

fn default_rpc_timeout_seconds() -> u64 {
    defaults::RPC_TIMEOUT_SECONDS
}

/// Additional endpoint file; every `*.toml` besides main.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsFile {
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub name: String,
    pub url: String,
    pub icon: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl EndpointConfig {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            icon: None,
            enabled: true,
        }
    }

    pub fn recovery_icon(&self) -> &str {
        self.icon.as_deref().unwrap_or(defaults::RECOVERY_ICON)
    }
}

impl Config {
    /// Endpoints that take part in monitoring, in configuration order
    pub fn enabled_endpoints(&self) -> Vec<EndpointConfig> {
        self.endpoints.iter().filter(|e| e.enabled).cloned().collect()
    }

    /// Freshness threshold as a chrono delta; `None` if out of chrono's range
    pub fn freshness_threshold(&self) -> Option<TimeDelta> {
        i64::try_from(self.freshness_threshold_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.check_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "check_interval_ms".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.freshness_threshold_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "freshness_threshold_seconds".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.freshness_threshold().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "freshness_threshold_seconds".to_string(),
                reason: "out of range".to_string(),
            });
        }

        if self.rpc_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rpc_timeout_seconds".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for endpoint in &self.endpoints {
            if !seen.insert(endpoint.name.as_str()) {
                return Err(ConfigError::DuplicateEndpoint {
                    name: endpoint.name.clone(),
                });
            }
            if !endpoint.url.starts_with("http://") && !endpoint.url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl {
                    name: endpoint.name.clone(),
                    url: endpoint.url.clone(),
                });
            }
        }

        if !self.endpoints.iter().any(|e| e.enabled) {
            return Err(ConfigError::NoEndpoints);
        }

        Ok(())
    }
}
