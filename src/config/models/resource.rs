//! Resource declarations

use crate::core::keys::KeyStrategy;
use crate::core::validation::Rules;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Who may act on a resource's records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// No checks
    #[default]
    Public,
    /// Guests are rejected
    Authenticated,
    /// Guests are rejected; callers only see and change their own records
    Owner,
}

/// Validation rules per write operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceRules {
    #[serde(default)]
    pub create: Rules,
    /// Falls back to `create` when empty
    #[serde(default)]
    pub replace: Rules,
    #[serde(default)]
    pub modify: Rules,
}

impl ResourceRules {
    pub fn for_replace(&self) -> &Rules {
        if self.replace.is_empty() {
            &self.create
        } else {
            &self.replace
        }
    }
}

/// A record collection exposed under the API prefix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Collection name, also the first path segment
    pub name: String,
    /// Key generation strategy
    #[serde(default)]
    pub key: KeyStrategy,
    /// Mass-assignable attributes (empty admits everything but reserved ones)
    #[serde(default)]
    pub fillable: Vec<String>,
    /// Attributes left out of read views
    #[serde(default)]
    pub hidden: Vec<String>,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub rules: ResourceRules,
}

impl ResourceConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: KeyStrategy::default(),
            fillable: vec![],
            hidden: vec![],
            policy: Policy::default(),
            rules: ResourceRules::default(),
        }
    }

    /// Validate a single resource declaration
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Resource name cannot be empty".to_string());
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(format!(
                "Resource name '{}' may only contain letters, digits, '_' and '-'",
                self.name
            ));
        }
        if self.name == "users" {
            return Err("Resource name 'users' is reserved".to_string());
        }
        Ok(())
    }
}

/// Validate the resource list as a whole
pub fn validate_resources(resources: &[ResourceConfig], batch_path: &str) -> Result<(), String> {
    let mut names = HashSet::new();
    for resource in resources {
        resource.validate()?;
        if !names.insert(resource.name.as_str()) {
            return Err(format!("Duplicate resource name: {}", resource.name));
        }
        if resource.name == batch_path.trim_matches('/') {
            return Err(format!(
                "Resource name '{}' collides with the batch endpoint",
                resource.name
            ));
        }
    }
    Ok(())
}
