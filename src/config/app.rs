//! Main application configuration
//!
//! This module defines the configuration structures for the olga-queue client,
//! including environment variable loading, TOML files and validation.

use crate::wait_time::{WaitEstimator, DEFAULT_AVG_SERVICE_SECONDS};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub api: ApiSettings,
    pub queue: QueueSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Desk API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the desk API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
}

/// Queue defaults used when callers do not supply their own
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueSettings {
    /// Average time to serve one entry, for wait estimates
    pub avg_service_seconds: f64,
    /// Priority of new entries
    pub default_priority: i32,
    /// Number of entries claimed per `next` call
    pub default_batch_size: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "olga-queue".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            avg_service_seconds: DEFAULT_AVG_SERVICE_SECONDS as f64,
            default_priority: 5,
            default_batch_size: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables override
    /// values from the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text without touching the environment
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // API settings
        if let Ok(base_url) = env::var("API_BASE") {
            self.api.base_url = base_url;
        }
        if let Ok(timeout) = env::var("API_TIMEOUT_SECONDS") {
            self.api.request_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid API_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Queue settings
        if let Ok(avg) = env::var("AVG_SERVICE_SECONDS") {
            self.queue.avg_service_seconds = avg
                .parse()
                .map_err(|_| anyhow!("Invalid AVG_SERVICE_SECONDS value: {}", avg))?;
        }
        if let Ok(priority) = env::var("DEFAULT_PRIORITY") {
            self.queue.default_priority = priority
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_PRIORITY value: {}", priority))?;
        }
        if let Ok(batch) = env::var("DEFAULT_BATCH_SIZE") {
            self.queue.default_batch_size = batch
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_BATCH_SIZE value: {}", batch))?;
        }

        Ok(())
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_seconds)
    }

    /// Build the wait estimator for the configured service time
    pub fn wait_estimator(&self) -> crate::error::Result<WaitEstimator> {
        WaitEstimator::from_secs_f64(self.queue.avg_service_seconds)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate API settings
    if config.api.base_url.is_empty() {
        return Err(anyhow!("API base URL cannot be empty"));
    }
    if !config.api.base_url.starts_with("http://") && !config.api.base_url.starts_with("https://")
    {
        return Err(anyhow!(
            "API base URL must start with http:// or https://: {}",
            config.api.base_url
        ));
    }
    if config.api.request_timeout_seconds == 0 {
        return Err(anyhow!("API request timeout must be greater than 0"));
    }

    // Validate queue settings
    if !config.queue.avg_service_seconds.is_finite() || config.queue.avg_service_seconds <= 0.0 {
        return Err(anyhow!(
            "Average service seconds must be positive, got {}",
            config.queue.avg_service_seconds
        ));
    }
    if config.queue.default_batch_size == 0 {
        return Err(anyhow!("Default batch size must be greater than 0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.queue.avg_service_seconds, 60.0);
        assert_eq!(config.queue.default_priority, 5);
        assert_eq!(config.queue.default_batch_size, 5);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.service.log_level = "verbose".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.api.base_url = "127.0.0.1:3000".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.api.request_timeout_seconds = 0;
        assert!(validate_config(&config).is_err());

        for avg in [0.0, -1.0, f64::NAN] {
            let mut config = AppConfig::default();
            config.queue.avg_service_seconds = avg;
            assert!(validate_config(&config).is_err());
        }

        let mut config = AppConfig::default();
        config.queue.default_batch_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [api]
            base_url = "https://desk.example.com"

            [queue]
            avg_service_seconds = 90.0
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://desk.example.com");
        assert_eq!(config.api.request_timeout_seconds, 30);
        assert_eq!(config.queue.avg_service_seconds, 90.0);
        assert_eq!(config.queue.default_batch_size, 5);
        assert_eq!(config.service.log_level, "info");
    }

    #[test]
    fn test_wait_estimator_from_config() {
        let mut config = AppConfig::default();
        config.queue.avg_service_seconds = 120.0;
        let estimator = config.wait_estimator().unwrap();
        assert_eq!(estimator.estimate(2).unwrap().minutes, 4);
    }
}
