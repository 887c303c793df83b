//! Test configuration builders

use monitor::config::{Config, EndpointConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Endpoint with default icon, enabled
pub fn endpoint(name: &str, url: &str) -> EndpointConfig {
    EndpointConfig::new(name, url)
}

/// In-memory config with short timeouts for tests
pub fn test_config(endpoints: Vec<EndpointConfig>, notification_url: &str) -> Config {
    Config {
        check_interval_ms: 10,
        freshness_threshold_seconds: 300,
        rpc_timeout_seconds: 2,
        notification_url: notification_url.to_string(),
        notify_on_down: false,
        endpoints,
    }
}

/// Builder writing main.toml plus endpoint files into a temp directory
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    main_toml: String,
    endpoint_files: Vec<(String, String)>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            main_toml: String::new(),
            endpoint_files: Vec::new(),
        }
    }

    pub fn main_toml(mut self, content: &str) -> Self {
        self.main_toml = content.to_string();
        self
    }

    pub fn endpoint_file(mut self, name: &str, content: &str) -> Self {
        self.endpoint_files
            .push((name.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        fs::write(config_dir.join("main.toml"), &self.main_toml)
            .expect("Failed to write main.toml");

        for (name, content) in &self.endpoint_files {
            fs::write(config_dir.join(format!("{}.toml", name)), content)
                .expect("Failed to write endpoint file");
        }

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Built test configuration with temp directory
pub struct TestConfig {
    _temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestConfig {
    pub fn config_dir_string(&self) -> String {
        self.config_dir.to_string_lossy().to_string()
    }
}
