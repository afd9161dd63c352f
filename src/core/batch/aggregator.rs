//! Assembly of the multi-status payload

use super::types::{BatchOutcome, SubResponse};
use serde_json::{Value, json};

/// HTTP status of every completed batch call
pub const MULTI_STATUS: u16 = 207;

pub fn aggregate(responses: Vec<SubResponse>) -> BatchOutcome {
    BatchOutcome {
        status: MULTI_STATUS,
        responses,
    }
}

impl BatchOutcome {
    /// `{"responses": [{"status": .., "body": ..}, ..]}`
    pub fn to_body(&self) -> Value {
        json!({ "responses": self.responses })
    }
}
