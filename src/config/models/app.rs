//! Main application configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Batch endpoint configuration
    #[serde(default)]
    pub batch: BatchConfig,
    /// Record collections
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

impl AppConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self, String> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override selected values from `RESTAPI_*` / `DATABASE_URL` variables
    pub fn apply_env_overrides(&mut self) -> Result<(), String> {
        if let Ok(host) = std::env::var("RESTAPI_HOST") {
            debug!("Overriding server.host from environment");
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("RESTAPI_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| format!("Invalid RESTAPI_PORT: {}", port))?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            debug!("Overriding storage.database.url from environment");
            self.storage.database.url = url;
        }
        if let Ok(timeout) = std::env::var("RESTAPI_BATCH_TIMEOUT") {
            self.batch.timeout_secs = timeout
                .parse()
                .map_err(|_| format!("Invalid RESTAPI_BATCH_TIMEOUT: {}", timeout))?;
        }
        Ok(())
    }

    /// Look up a resource declaration by collection name
    pub fn resource(&self, name: &str) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.name == name)
    }
}
