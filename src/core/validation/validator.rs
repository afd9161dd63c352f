//! Field validation against rule sets

use super::rule::{Rule, RuleSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex"));

/// Rules keyed by dotted field path (`requests.0.method`)
pub type Rules = BTreeMap<String, RuleSet>;

/// Field → messages, in field order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add<F: Into<String>, S: Into<String>>(&mut self, field: F, message: S) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// First message, with a count of the rest
    pub fn summary(&self) -> String {
        let first = self
            .0
            .values()
            .flat_map(|messages| messages.iter())
            .next()
            .cloned()
            .unwrap_or_else(|| "The given data was invalid.".to_string());
        match self.len() {
            0 | 1 => first,
            n => format!("{} (and {} more errors)", first, n - 1),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Look up a dotted path; numeric segments index into arrays
pub fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Validate `data` against `rules`, collecting every failure
pub fn validate(data: &Value, rules: &Rules) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for (field, rule_set) in rules {
        let value = lookup(data, field);

        if !is_present(value) {
            if rule_set.is_required() {
                errors.add(field.as_str(), format!("The {} field is required.", field));
            }
            continue;
        }

        let Some(value) = value else { continue };
        for rule in rule_set.rules() {
            if let Some(message) = check(field, value, rule) {
                errors.add(field.as_str(), message);
            }
        }
    }

    errors.into_result()
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn check(field: &str, value: &Value, rule: &Rule) -> Option<String> {
    match rule {
        Rule::Required => None,
        Rule::String => (!value.is_string()).then(|| format!("The {} must be a string.", field)),
        Rule::Integer => (!(value.is_i64() || value.is_u64()))
            .then(|| format!("The {} must be an integer.", field)),
        Rule::Numeric => {
            (!value.is_number()).then(|| format!("The {} must be a number.", field))
        }
        Rule::Boolean => (!value.is_boolean())
            .then(|| format!("The {} field must be true or false.", field)),
        Rule::Email => {
            let valid = value.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s));
            (!valid).then(|| format!("The {} must be a valid email address.", field))
        }
        Rule::Array => (!value.is_array()).then(|| format!("The {} must be an array.", field)),
        Rule::Object => {
            (!value.is_object()).then(|| format!("The {} must be an object.", field))
        }
        Rule::Min(bound) => size_of(value).and_then(|(size, unit)| {
            (size < *bound).then(|| match unit {
                SizeUnit::Characters => {
                    format!("The {} must be at least {} characters.", field, bound)
                }
                SizeUnit::Items => format!("The {} must have at least {} items.", field, bound),
                SizeUnit::Value => format!("The {} must be at least {}.", field, bound),
            })
        }),
        Rule::Max(bound) => size_of(value).and_then(|(size, unit)| {
            (size > *bound).then(|| match unit {
                SizeUnit::Characters => {
                    format!("The {} may not be greater than {} characters.", field, bound)
                }
                SizeUnit::Items => {
                    format!("The {} may not have more than {} items.", field, bound)
                }
                SizeUnit::Value => format!("The {} may not be greater than {}.", field, bound),
            })
        }),
        Rule::In(allowed) => {
            let literal = match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            };
            let valid = literal.is_some_and(|l| allowed.contains(&l));
            (!valid).then(|| format!("The selected {} is invalid.", field))
        }
    }
}

enum SizeUnit {
    Characters,
    Items,
    Value,
}

fn size_of(value: &Value) -> Option<(f64, SizeUnit)> {
    match value {
        Value::String(s) => Some((s.chars().count() as f64, SizeUnit::Characters)),
        Value::Array(items) => Some((items.len() as f64, SizeUnit::Items)),
        Value::Object(map) => Some((map.len() as f64, SizeUnit::Items)),
        Value::Number(n) => n.as_f64().map(|v| (v, SizeUnit::Value)),
        _ => None,
    }
}
