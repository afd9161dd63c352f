//! Authentication and Security utilities
//!
//! This module provides password hashing and API token utilities.

pub mod crypto;

// Re-export commonly used functions
pub use crypto::*;
