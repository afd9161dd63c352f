//! Authentication configuration

use super::*;
use serde::{Deserialize, Serialize};

/// API token authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Length of issued API tokens
    #[serde(default = "default_token_length")]
    pub token_length: usize,
    /// Query parameter accepted as an alternative to `Authorization: Bearer`
    #[serde(default = "default_token_query_param")]
    pub token_query_param: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_length: default_token_length(),
            token_query_param: default_token_query_param(),
        }
    }
}

impl AuthConfig {
    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.token_length < 32 {
            return Err("API token length must be at least 32 characters".to_string());
        }
        if self.token_query_param.is_empty() {
            return Err("Token query parameter name cannot be empty".to_string());
        }
        Ok(())
    }
}
