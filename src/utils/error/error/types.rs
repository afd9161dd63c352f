//! Error types for the service

use crate::core::validation::ValidationErrors;
use thiserror::Error;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Field validation errors
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Route exists but not for this method
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Conflict errors (duplicates, unique violations)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A batch placeholder could not be resolved
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    /// Skipped because an earlier sibling failed in an atomic batch
    #[error("Failed dependency: {0}")]
    FailedDependency(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
