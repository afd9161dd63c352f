//! Test configuration and request fixtures
//!
//! Collections used across the integration tests:
//! - `orgs`: public, `name` required on create
//! - `projects`: authenticated, `org_id` and `name` required
//! - `notes`: owner-only, `secret` hidden from reads

use super::database::TestDatabase;
use restapi_rs::config::{AppConfig, Config, DatabaseConfig, Policy, ResourceConfig};
use restapi_rs::core::validation::{RuleSet, Rules};
use restapi_rs::server::AppState;
use serde_json::{Value, json};

/// Password used for every registered test user
pub const PASSWORD: &str = "secret-password";

/// Batch size limit in the test configuration
pub const MAX_BATCH: usize = 5;

/// Parse `(field, "rule|rule")` pairs
pub fn rules(pairs: &[(&str, &str)]) -> Rules {
    pairs
        .iter()
        .map(|(field, rule)| {
            let set: RuleSet = rule.parse().expect("Invalid test rule");
            (field.to_string(), set)
        })
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Configuration with the test collections over an in-memory database
pub fn test_config() -> Config {
    let mut orgs = ResourceConfig::new("orgs");
    orgs.fillable = strings(&["name", "country"]);
    orgs.rules.create = rules(&[("name", "required|string|max:255"), ("country", "string")]);
    orgs.rules.modify = rules(&[("name", "string|max:255")]);

    let mut projects = ResourceConfig::new("projects");
    projects.fillable = strings(&["org_id", "name"]);
    projects.policy = Policy::Authenticated;
    projects.rules.create = rules(&[("org_id", "required|string"), ("name", "required|string")]);

    let mut notes = ResourceConfig::new("notes");
    notes.fillable = strings(&["title", "secret"]);
    notes.hidden = strings(&["secret"]);
    notes.policy = Policy::Owner;
    notes.rules.create = rules(&[("title", "required|string")]);

    let mut app = AppConfig::default();
    app.storage.database = DatabaseConfig::in_memory();
    app.batch.max_requests = MAX_BATCH;
    app.resources = vec![orgs, projects, notes];

    Config { app }
}

/// Application state over a fresh in-memory database
pub async fn test_state() -> AppState {
    let db = TestDatabase::new().await;
    AppState::new(test_config(), db.db_arc())
}

/// Registration payload for `email`
pub fn register_body(email: &str) -> Value {
    json!({ "email": email, "password": PASSWORD })
}

/// `Authorization` header carrying `token`
pub fn bearer(token: &str) -> (&'static str, String) {
    ("authorization", format!("Bearer {}", token))
}

/// One batch sub-request
pub fn sub_request(method: &str, path: &str, body: Value) -> Value {
    json!({ "method": method, "path": path, "body": body })
}
