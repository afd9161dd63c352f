//! Reference substitution between sub-requests
//!
//! `$(N.field)` refers to `field` of the body of the `N`-th earlier response;
//! `$(field)` (paths only) refers to `field` of the current, already
//! substituted body. A string that is exactly one token becomes the
//! referenced JSON value; tokens inside longer strings are interpolated.

use super::types::SubResponse;
use crate::utils::error::{ApiError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

static CROSS_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\(([0-9]+)\.([A-Za-z0-9_]+)\)").expect("Invalid cross reference regex")
});

static PATH_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\((?:([0-9]+)\.([A-Za-z0-9_]+)|([A-Za-z0-9_]+))\)")
        .expect("Invalid path reference regex")
});

/// Substitute cross-response references in every string of `body`
///
/// `index` is the position of the sub-request being resolved; only
/// `responses[..index]` may be referenced.
pub fn resolve_body(
    body: &Map<String, Value>,
    responses: &[SubResponse],
    index: usize,
) -> Result<Map<String, Value>> {
    body.iter()
        .map(|(key, value)| Ok((key.clone(), resolve_value(value, responses, index)?)))
        .collect()
}

fn resolve_value(value: &Value, responses: &[SubResponse], index: usize) -> Result<Value> {
    match value {
        Value::String(s) => resolve_string(s, responses, index),
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_value(item, responses, index))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => resolve_body(map, responses, index).map(Value::Object),
        other => Ok(other.clone()),
    }
}

fn resolve_string(s: &str, responses: &[SubResponse], index: usize) -> Result<Value> {
    if let Some(caps) = CROSS_REFERENCE.captures(s) {
        if caps.get(0).map(|m| m.as_str().len()) == Some(s.len()) {
            return cross_reference(&caps, responses, index).cloned();
        }
    } else {
        return Ok(Value::String(s.to_string()));
    }

    replace_all(&CROSS_REFERENCE, s, |caps| {
        cross_reference(caps, responses, index).map(interpolate)
    })
    .map(Value::String)
}

/// Substitute every reference in `path` in a single left-to-right pass
pub fn resolve_path(
    path: &str,
    body: &Map<String, Value>,
    responses: &[SubResponse],
    index: usize,
) -> Result<String> {
    replace_all(&PATH_REFERENCE, path, |caps| match caps.get(3) {
        Some(field) => body
            .get(field.as_str())
            .map(interpolate)
            .ok_or_else(|| {
                ApiError::unresolved_reference(format!(
                    "Reference {} has no matching field in the request body",
                    &caps[0]
                ))
            }),
        None => cross_reference(caps, responses, index).map(interpolate),
    })
}

fn cross_reference<'r>(
    caps: &Captures<'_>,
    responses: &'r [SubResponse],
    index: usize,
) -> Result<&'r Value> {
    let token = &caps[0];
    let unresolved = |reason: &str| {
        ApiError::unresolved_reference(format!("Reference {} {}", token, reason))
    };

    let target: usize = caps[1]
        .parse()
        .map_err(|_| unresolved("points past the end of the batch"))?;
    if target >= index {
        return Err(unresolved("does not point to an earlier request"));
    }

    let response = responses
        .get(target)
        .ok_or_else(|| unresolved("points to a request with no response"))?;
    if !response.is_success() {
        return Err(unresolved("points to a failed request"));
    }

    response
        .body
        .as_ref()
        .and_then(Value::as_object)
        .ok_or_else(|| unresolved("points to a response without an object body"))?
        .get(&caps[2])
        .ok_or_else(|| unresolved("names a field missing from the response"))
}

/// Text form used when a value is embedded in a longer string
fn interpolate(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn replace_all<F>(regex: &Regex, input: &str, mut replacement: F) -> Result<String>
where
    F: FnMut(&Captures<'_>) -> Result<String>,
{
    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for caps in regex.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        output.push_str(&input[last..whole.start()]);
        output.push_str(&replacement(&caps)?);
        last = whole.end();
    }
    output.push_str(&input[last..]);
    Ok(output)
}
