//! Batch endpoint configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Batch endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Endpoint path below the API prefix
    #[serde(default = "default_batch_path")]
    pub path: String,
    /// Maximum number of sub-requests in one batch
    #[serde(default = "default_batch_max_requests")]
    pub max_requests: usize,
    /// Deadline for the whole batch in seconds
    #[serde(default = "default_batch_timeout")]
    pub timeout_secs: u64,
    /// Atomic mode for the bare-array envelope (the object envelope defaults to non-atomic)
    #[serde(default = "default_array_atomic")]
    pub array_atomic: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            path: default_batch_path(),
            max_requests: default_batch_max_requests(),
            timeout_secs: default_batch_timeout(),
            array_atomic: default_array_atomic(),
        }
    }
}

impl BatchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate batch configuration
    pub fn validate(&self) -> Result<(), String> {
        let path = self.path.trim_matches('/');
        if path.is_empty() {
            return Err("Batch path cannot be empty".to_string());
        }
        if path.contains('/') {
            return Err("Batch path must be a single path segment".to_string());
        }
        if self.max_requests == 0 {
            return Err("Batch max_requests must be at least 1".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("Batch timeout cannot be 0".to_string());
        }
        Ok(())
    }
}
