//! Batch data model

use crate::core::rest::{HttpMethod, RestResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Methods a sub-request may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BatchMethod {
    Post,
    Put,
    Patch,
}

impl From<BatchMethod> for HttpMethod {
    fn from(method: BatchMethod) -> Self {
        match method {
            BatchMethod::Post => HttpMethod::Post,
            BatchMethod::Put => HttpMethod::Put,
            BatchMethod::Patch => HttpMethod::Patch,
        }
    }
}

/// One element of the submitted list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequestSpec {
    pub method: BatchMethod,
    #[serde(default)]
    pub body: Map<String, Value>,
    /// Relative to the parent of the batch endpoint path
    pub path: String,
}

/// A validated submission
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSubmission {
    pub requests: Vec<BatchRequestSpec>,
    pub atomic: bool,
}

/// The recorded outcome of one sub-request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl SubResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<RestResponse> for SubResponse {
    fn from(response: RestResponse) -> Self {
        Self {
            status: response.status,
            body: response.body,
        }
    }
}

/// Result of a completed batch call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Always 207
    #[serde(skip)]
    pub status: u16,
    pub responses: Vec<SubResponse>,
}

/// Where the orchestrator loop is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Running,
    ShortCircuited { failed_index: usize },
}

impl BatchState {
    /// Apply the outcome of entry `index`; only atomic failures change state
    pub fn record(self, index: usize, entry: &SubResponse, atomic: bool) -> Self {
        match self {
            BatchState::Running if atomic && !entry.is_success() => {
                BatchState::ShortCircuited {
                    failed_index: index,
                }
            }
            state => state,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, BatchState::Running)
    }
}
