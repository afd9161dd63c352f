//! Parsing and validation of the submitted batch payload

use super::types::{BatchRequestSpec, BatchSubmission};
use crate::config::BatchConfig;
use crate::core::validation::{Rule, RuleSet, Rules, validate};
use crate::utils::error::{ApiError, Result};
use serde_json::{Value, json};

const MISSING_REQUESTS: &str = "An array of requests must be supplied";

/// Accepts either a bare array of requests (atomic per `array_atomic`) or
/// `{"requests": [...], "atomic": bool}` (atomic defaults to false)
pub fn parse_submission(payload: Value, config: &BatchConfig) -> Result<BatchSubmission> {
    let (requests, atomic) = match payload {
        Value::Array(items) => (Value::Array(items), config.array_atomic),
        Value::Object(mut envelope) => {
            let atomic = match envelope.remove("atomic") {
                None | Some(Value::Null) => false,
                Some(Value::Bool(atomic)) => atomic,
                Some(_) => {
                    return Err(ApiError::validation(
                        "atomic",
                        "The atomic field must be true or false.",
                    ));
                }
            };
            match envelope.remove("requests") {
                Some(requests @ Value::Array(_)) => (requests, atomic),
                _ => return Err(ApiError::validation("requests", MISSING_REQUESTS)),
            }
        }
        _ => return Err(ApiError::validation("requests", MISSING_REQUESTS)),
    };

    let count = requests.as_array().map(Vec::len).unwrap_or_default();
    let wrapped = json!({ "requests": requests });
    validate(&wrapped, &envelope_rules(count, config.max_requests))?;

    let requests: Vec<BatchRequestSpec> = serde_json::from_value(wrapped["requests"].clone())
        .map_err(|e| ApiError::validation("requests", format!("Malformed request: {}", e)))?;

    Ok(BatchSubmission { requests, atomic })
}

/// Rules for a list of `count` sub-requests
pub fn envelope_rules(count: usize, max_requests: usize) -> Rules {
    let mut rules = Rules::new();
    rules.insert(
        "requests".to_string(),
        RuleSet::new(vec![
            Rule::Required,
            Rule::Array,
            Rule::Max(max_requests as f64),
        ]),
    );

    let methods = vec!["POST".to_string(), "PUT".to_string(), "PATCH".to_string()];
    for i in 0..count {
        rules.insert(
            format!("requests.{}.method", i),
            RuleSet::new(vec![Rule::Required, Rule::In(methods.clone())]),
        );
        rules.insert(
            format!("requests.{}.body", i),
            RuleSet::new(vec![Rule::Required, Rule::Object]),
        );
        rules.insert(
            format!("requests.{}.path", i),
            RuleSet::new(vec![Rule::Required, Rule::String]),
        );
    }
    rules
}
