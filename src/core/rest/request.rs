//! Transport-independent request and response types
//!
//! The HTTP layer and the batch orchestrator both build [`RestRequest`]s and
//! hand them to the same dispatcher.

use crate::utils::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Methods the resource controllers understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(ApiError::method_not_allowed(format!(
                "Method {} is not allowed",
                other
            ))),
        }
    }
}

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// Per-request context inherited by batch sub-requests
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: String,
    pub user: Option<AuthUser>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: Option<AuthUser>) -> Self {
        self.user = user;
        self
    }

    /// Context of the `index`-th sub-request of a batch
    pub fn child(&self, index: usize) -> Self {
        Self {
            request_id: format!("{}-{}", self.request_id, index),
            user: self.user.clone(),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// The authenticated user, or 401 for guests
    pub fn require_user(&self) -> Result<&AuthUser> {
        self.user
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("Unauthenticated."))
    }
}

/// A request headed for a resource controller
#[derive(Debug, Clone)]
pub struct RestRequest {
    pub method: HttpMethod,
    /// Absolute path without the query string
    pub path: String,
    pub query: HashMap<String, String>,
    /// JSON payload; `Value::Null` when there was none
    pub body: Value,
    pub context: RequestContext,
}

impl RestRequest {
    /// Build from a target that may carry a `?query` suffix
    pub fn new(method: HttpMethod, target: &str, body: Value, context: RequestContext) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (target, HashMap::new()),
        };

        Self {
            method,
            path: path.to_string(),
            query,
            body,
            context,
        }
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// The body as an object; a missing body counts as empty
    pub fn body_object(&self) -> Result<serde_json::Map<String, Value>> {
        match &self.body {
            Value::Null => Ok(serde_json::Map::new()),
            Value::Object(map) => Ok(map.clone()),
            _ => Err(ApiError::bad_request("Request body must be a JSON object")),
        }
    }
}

/// Decode an `application/x-www-form-urlencoded` query string
pub fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// A controller's answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl RestResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, Some(body))
    }

    pub fn created(body: Value) -> Self {
        Self::new(201, Some(body))
    }

    pub fn no_content() -> Self {
        Self::new(204, None)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
