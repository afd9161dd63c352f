//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod app;
pub mod auth;
pub mod batch;
pub mod resource;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use app::*;
pub use auth::*;
pub use batch::*;
pub use resource::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

pub fn default_api_prefix() -> String {
    "/api".to_string()
}

pub fn default_database_url() -> String {
    "sqlite://restapi.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_auto_migrate() -> bool {
    true
}

pub fn default_token_length() -> usize {
    60
}

pub fn default_token_query_param() -> String {
    "api_token".to_string()
}

pub fn default_batch_path() -> String {
    "batch".to_string()
}

pub fn default_batch_max_requests() -> usize {
    100
}

pub fn default_batch_timeout() -> u64 {
    30
}

pub fn default_array_atomic() -> bool {
    true
}
