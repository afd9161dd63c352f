//! Primary key generation strategies for records

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a resource generates keys for records created without one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Hyphenated UUIDv4, e.g. `0f8fad5b-d9cb-469f-a165-70867728950e`
    #[default]
    Uuid,
    /// UUIDv4 bytes as URL-safe base64 without padding, e.g. `3V_4npGbQEKzMNJyGxGEpw`
    Base64Uuid,
}

impl KeyStrategy {
    /// Generate a fresh key
    pub fn generate(&self) -> String {
        match self {
            KeyStrategy::Uuid => Uuid::new_v4().to_string(),
            KeyStrategy::Base64Uuid => url_safe_base64_uuid(),
        }
    }

    /// Keep a caller-supplied key, otherwise generate one
    pub fn key_or_generate(&self, supplied: Option<&str>) -> String {
        match supplied {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => self.generate(),
        }
    }
}

/// A UUIDv4 encoded as 22 URL-safe base64 characters
pub fn url_safe_base64_uuid() -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
}
