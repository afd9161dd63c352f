//! Core configuration validators
//!
//! Aggregates the per-section checks into one pass over [`AppConfig`].

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating application configuration");

        if self.server.host.is_empty() {
            return Err("Server config error: host cannot be empty".to_string());
        }
        self.server
            .validate()
            .map_err(|e| format!("Server config error: {}", e))?;
        self.storage
            .database
            .validate()
            .map_err(|e| format!("Database config error: {}", e))?;
        self.auth
            .validate()
            .map_err(|e| format!("Auth config error: {}", e))?;
        self.batch
            .validate()
            .map_err(|e| format!("Batch config error: {}", e))?;
        validate_resources(&self.resources, &self.batch.path)
            .map_err(|e| format!("Resource config error: {}", e))?;

        debug!("Application configuration validation completed");
        Ok(())
    }
}
