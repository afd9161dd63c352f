//! Validation rule definitions and parsing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single field rule
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Present, not null, not an empty string, not an empty array
    Required,
    /// JSON string
    String,
    /// JSON integer
    Integer,
    /// Any JSON number
    Numeric,
    /// JSON boolean
    Boolean,
    /// String shaped like an email address
    Email,
    /// JSON array (a list, never a keyed mapping)
    Array,
    /// JSON object
    Object,
    /// Lower bound on length, size or value
    Min(f64),
    /// Upper bound on length, size or value
    Max(f64),
    /// Value must be one of the listed literals
    In(Vec<String>),
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, param) = match s.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param.trim())),
            None => (s.trim(), None),
        };

        let bound = |param: Option<&str>| -> Result<f64, String> {
            param
                .ok_or_else(|| format!("Rule '{}' requires a parameter", name))?
                .parse::<f64>()
                .map_err(|e| format!("Invalid parameter for rule '{}': {}", name, e))
        };

        match name {
            "required" => Ok(Rule::Required),
            "string" => Ok(Rule::String),
            "integer" => Ok(Rule::Integer),
            "numeric" => Ok(Rule::Numeric),
            "boolean" => Ok(Rule::Boolean),
            "email" => Ok(Rule::Email),
            "array" => Ok(Rule::Array),
            "object" => Ok(Rule::Object),
            "min" => Ok(Rule::Min(bound(param)?)),
            "max" => Ok(Rule::Max(bound(param)?)),
            "in" => {
                let values: Vec<String> = param
                    .ok_or_else(|| "Rule 'in' requires a list of values".to_string())?
                    .split(',')
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
                if values.is_empty() {
                    return Err("Rule 'in' requires a list of values".to_string());
                }
                Ok(Rule::In(values))
            }
            other => Err(format!("Unknown validation rule: {}", other)),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "required"),
            Rule::String => write!(f, "string"),
            Rule::Integer => write!(f, "integer"),
            Rule::Numeric => write!(f, "numeric"),
            Rule::Boolean => write!(f, "boolean"),
            Rule::Email => write!(f, "email"),
            Rule::Array => write!(f, "array"),
            Rule::Object => write!(f, "object"),
            Rule::Min(n) => write!(f, "min:{}", n),
            Rule::Max(n) => write!(f, "max:{}", n),
            Rule::In(values) => write!(f, "in:{}", values.join(",")),
        }
    }
}

/// Ordered rules for one field, written as `required|string|max:255`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleSet(Vec<Rule>);

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.0
    }

    pub fn is_required(&self) -> bool {
        self.0.contains(&Rule::Required)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for RuleSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Rule::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(RuleSet)
    }
}

impl TryFrom<String> for RuleSet {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RuleSet> for String {
    fn from(set: RuleSet) -> Self {
        set.0
            .iter()
            .map(Rule::to_string)
            .collect::<Vec<_>>()
            .join("|")
    }
}
