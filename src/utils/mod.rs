//! Utility modules
//!
//! - **auth**: Password hashing and API token utilities
//! - **error**: Error types and HTTP error rendering

pub mod auth;
pub mod error;

use uuid::Uuid;

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
