//! Resource definitions and the routing table built from configuration

use crate::config::{Policy, ResourceConfig, ResourceRules};
use crate::core::keys::KeyStrategy;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

/// Attributes the controllers manage themselves
pub const RESERVED_ATTRIBUTES: [&str; 4] = ["id", "created_at", "updated_at", "created_by"];

/// A record collection ready to serve requests
#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    pub name: String,
    pub key: KeyStrategy,
    pub policy: Policy,
    pub rules: ResourceRules,
    fillable: HashSet<String>,
    hidden: HashSet<String>,
}

impl ResourceDefinition {
    pub fn is_fillable(&self, attribute: &str) -> bool {
        if RESERVED_ATTRIBUTES.contains(&attribute) {
            return false;
        }
        self.fillable.is_empty() || self.fillable.contains(attribute)
    }

    pub fn is_hidden(&self, attribute: &str) -> bool {
        self.hidden.contains(attribute)
    }

    /// Keep only mass-assignable attributes
    pub fn fill(&self, input: &Map<String, Value>) -> Map<String, Value> {
        input
            .iter()
            .filter(|(key, _)| self.is_fillable(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Drop hidden attributes for read views
    pub fn visible(&self, attributes: Map<String, Value>) -> Map<String, Value> {
        attributes
            .into_iter()
            .filter(|(key, _)| !self.is_hidden(key))
            .collect()
    }
}

impl From<&ResourceConfig> for ResourceDefinition {
    fn from(config: &ResourceConfig) -> Self {
        Self {
            name: config.name.clone(),
            key: config.key,
            policy: config.policy,
            rules: config.rules.clone(),
            fillable: config.fillable.iter().cloned().collect(),
            hidden: config.hidden.iter().cloned().collect(),
        }
    }
}

/// Collection name → definition
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: HashMap<String, Arc<ResourceDefinition>>,
}

impl ResourceRegistry {
    pub fn from_config(resources: &[ResourceConfig]) -> Self {
        let resources: HashMap<_, _> = resources
            .iter()
            .map(|config| (config.name.clone(), Arc::new(ResourceDefinition::from(config))))
            .collect();
        info!("Registered {} resource collection(s)", resources.len());
        Self { resources }
    }

    pub fn get(&self, name: &str) -> Option<Arc<ResourceDefinition>> {
        self.resources.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.resources.keys()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
