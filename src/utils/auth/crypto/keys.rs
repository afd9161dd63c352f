//! API token generation utilities

use rand::{Rng, distributions::Alphanumeric};
use sha2::{Digest, Sha256};

/// Generate a random alphanumeric API token
pub fn generate_api_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Hash an API token for storage and lookup
pub fn hash_api_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
