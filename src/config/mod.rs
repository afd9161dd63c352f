//! Configuration management
//!
//! This module handles loading, validation, and management of the service configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ApiError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Application configuration
    pub app: AppConfig,
}

impl Config {
    /// Load configuration from file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML document, then apply environment overrides
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut app: AppConfig = serde_yaml::from_str(content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config: {}", e)))?;
        app.apply_env_overrides().map_err(ApiError::Config)?;

        let config = Self { app };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let app = AppConfig::from_env().map_err(ApiError::Config)?;
        let config = Self { app };

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults plus environment
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::from_file(path).await
        } else {
            warn!(
                "Config file {:?} not found, using defaults and environment",
                path
            );
            Self::from_env()
        }
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.app.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.app.storage
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.app.auth
    }

    /// Get batch configuration
    pub fn batch(&self) -> &BatchConfig {
        &self.app.batch
    }

    /// Get declared resources
    pub fn resources(&self) -> &[ResourceConfig] {
        &self.app.resources
    }

    /// Absolute path of the batch endpoint, e.g. `/api/batch`
    pub fn batch_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.app.server.normalized_prefix(),
            self.app.batch.path.trim_matches('/')
        )
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(&self.app).map_err(ApiError::Config)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.app)
            .map_err(|e| ApiError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
