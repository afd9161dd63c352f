//! Cryptographic utilities
//!
//! Password hashing with Argon2 and API token generation/hashing.

pub mod keys;
pub mod password;

pub use keys::{generate_api_token, hash_api_token};
pub use password::{hash_password, verify_password};
