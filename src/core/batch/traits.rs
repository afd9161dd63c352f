//! Seams between the orchestrator and its collaborators

use super::types::SubResponse;
use crate::core::rest::{RequestContext, RestRequest, RestResponse};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;

/// Something that can open, commit and roll back a transaction
///
/// `commit` and `rollback` consume the transaction, so only a live
/// transaction can be finished, and only once.
#[async_trait]
pub trait TransactionalResource: Send + Sync {
    type Transaction: Send + Sync;

    async fn begin(&self) -> Result<Self::Transaction>;

    async fn commit(&self, transaction: Self::Transaction) -> Result<()>;

    async fn rollback(&self, transaction: Self::Transaction) -> Result<()>;
}

/// Runs one synthetic request through the normal handler chain
///
/// When `transaction` is given the request must run inside it (typically in
/// a nested savepoint) and must not commit or roll it back.
#[async_trait]
pub trait RequestDispatcher<T: Send + Sync>: Send + Sync {
    async fn dispatch(&self, transaction: Option<&T>, request: RestRequest)
    -> Result<RestResponse>;
}

/// Turns a dispatch error into a sub-response
pub trait ErrorTranslator: Send + Sync {
    fn translate(&self, error: &ApiError, context: &RequestContext) -> SubResponse;
}

/// Renders the same JSON error body the HTTP layer returns
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonErrorTranslator;

impl ErrorTranslator for JsonErrorTranslator {
    fn translate(&self, error: &ApiError, context: &RequestContext) -> SubResponse {
        let body = error.to_error_response(Some(&context.request_id));
        SubResponse {
            status: error.status_code().as_u16(),
            body: serde_json::to_value(body).ok(),
        }
    }
}
