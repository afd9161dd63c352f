//! Sequential execution of a batch with optional all-or-nothing semantics

use super::aggregator::aggregate;
use super::placeholder::{resolve_body, resolve_path};
use super::traits::{ErrorTranslator, JsonErrorTranslator, RequestDispatcher, TransactionalResource};
use super::types::{BatchOutcome, BatchRequestSpec, BatchState, BatchSubmission, SubResponse};
use crate::core::rest::{RequestContext, RestRequest, RestResponse};
use crate::utils::error::{ApiError, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

const SKIPPED_MESSAGE: &str = "Skipped because atomic operation failed";

/// Runs sub-requests in order through a [`RequestDispatcher`]
pub struct BatchOrchestrator<R, D, E = JsonErrorTranslator> {
    resource: Arc<R>,
    dispatcher: Arc<D>,
    translator: E,
    timeout: Duration,
    max_requests: usize,
}

impl<R, D> BatchOrchestrator<R, D, JsonErrorTranslator>
where
    R: TransactionalResource,
    D: RequestDispatcher<R::Transaction>,
{
    pub fn new(resource: Arc<R>, dispatcher: Arc<D>) -> Self {
        Self::with_translator(resource, dispatcher, JsonErrorTranslator)
    }
}

impl<R, D, E> BatchOrchestrator<R, D, E>
where
    R: TransactionalResource,
    D: RequestDispatcher<R::Transaction>,
    E: ErrorTranslator,
{
    pub fn with_translator(resource: Arc<R>, dispatcher: Arc<D>, translator: E) -> Self {
        Self {
            resource,
            dispatcher,
            translator,
            timeout: Duration::from_secs(30),
            max_requests: 100,
        }
    }

    /// Deadline for a whole batch
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_requests(mut self, max_requests: usize) -> Self {
        self.max_requests = max_requests;
        self
    }

    /// Execute `submission`; `base_path` is the parent of the batch endpoint
    /// path (e.g. `/api`) and `context` the parent request's context
    pub async fn execute(
        &self,
        submission: BatchSubmission,
        base_path: &str,
        context: &RequestContext,
    ) -> Result<BatchOutcome> {
        self.check_preconditions(&submission.requests)?;

        let BatchSubmission { requests, atomic } = submission;
        let deadline = Instant::now() + self.timeout;
        info!(
            request_id = %context.request_id,
            "Executing batch of {} request(s), atomic={}",
            requests.len(),
            atomic
        );

        let transaction = if atomic {
            Some(self.resource.begin().await?)
        } else {
            None
        };

        let mut state = BatchState::Running;
        let mut responses: Vec<SubResponse> = Vec::with_capacity(requests.len());

        for (index, spec) in requests.iter().enumerate() {
            let entry = match state {
                BatchState::ShortCircuited { .. } => {
                    skipped_entry(&self.translator, &context.child(index))
                }
                BatchState::Running => {
                    let child = context.child(index);
                    let result = self
                        .run_one(
                            spec,
                            index,
                            &responses,
                            base_path,
                            &child,
                            transaction.as_ref(),
                            deadline,
                        )
                        .await;
                    dispatched_entry(&self.translator, result, &child)
                }
            };

            state = state.record(index, &entry, atomic);
            if let BatchState::ShortCircuited { failed_index } = state {
                if failed_index == index {
                    warn!(
                        request_id = %context.request_id,
                        "Sub-request {} failed with status {}, skipping the rest",
                        index,
                        entry.status
                    );
                }
            }
            responses.push(entry);
        }

        if let Some(transaction) = transaction {
            match state {
                BatchState::Running => {
                    self.resource.commit(transaction).await.map_err(|e| {
                        warn!(request_id = %context.request_id, "Batch commit failed: {}", e);
                        ApiError::internal(format!("Failed to commit batch: {}", e))
                    })?;
                    debug!(request_id = %context.request_id, "Batch committed");
                }
                BatchState::ShortCircuited { failed_index } => {
                    if let Err(e) = self.resource.rollback(transaction).await {
                        warn!(
                            request_id = %context.request_id,
                            "Batch rollback after failure at {} failed: {}",
                            failed_index,
                            e
                        );
                    }
                }
            }
        }

        Ok(aggregate(responses))
    }

    fn check_preconditions(&self, requests: &[BatchRequestSpec]) -> Result<()> {
        if requests.is_empty() {
            return Err(ApiError::validation(
                "requests",
                "An array of requests must be supplied",
            ));
        }
        if requests.len() > self.max_requests {
            return Err(ApiError::validation(
                "requests",
                format!(
                    "The requests may not have more than {} items.",
                    self.max_requests
                ),
            ));
        }
        if let Some(index) = requests.iter().position(|r| r.path.trim().is_empty()) {
            return Err(ApiError::validation(
                format!("requests.{}.path", index),
                format!("The requests.{}.path field is required.", index),
            ));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_one(
        &self,
        spec: &BatchRequestSpec,
        index: usize,
        responses: &[SubResponse],
        base_path: &str,
        context: &RequestContext,
        transaction: Option<&R::Transaction>,
        deadline: Instant,
    ) -> Result<RestResponse> {
        if Instant::now() >= deadline {
            return Err(ApiError::timeout("Batch deadline exceeded before dispatch"));
        }

        let body = resolve_body(&spec.body, responses, index)?;
        let path = resolve_path(&spec.path, &body, responses, index)?;
        let request = RestRequest::new(
            spec.method.into(),
            &join_path(base_path, &path),
            Value::Object(body),
            context.clone(),
        );

        debug!(
            request_id = %context.request_id,
            "Dispatching {} {}",
            request.method,
            request.path
        );

        timeout_at(deadline, self.dispatcher.dispatch(transaction, request))
            .await
            .map_err(|_| ApiError::timeout("Batch deadline exceeded during dispatch"))?
    }
}

/// Entry for a sub-request that was attempted
pub fn dispatched_entry<E: ErrorTranslator>(
    translator: &E,
    result: Result<RestResponse>,
    context: &RequestContext,
) -> SubResponse {
    match result {
        Ok(response) => response.into(),
        Err(error) => translator.translate(&error, context),
    }
}

/// Entry for a sub-request skipped after an atomic failure
pub fn skipped_entry<E: ErrorTranslator>(translator: &E, context: &RequestContext) -> SubResponse {
    translator.translate(&ApiError::failed_dependency(SKIPPED_MESSAGE), context)
}

/// `base` joined with a relative path; a leading `/` on `relative` is ignored
pub fn join_path(base: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

/// Parent of the batch endpoint path: `/api/batch` → `/api`
pub fn parent_path(endpoint: &str) -> &str {
    let trimmed = endpoint.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(index) => &trimmed[..index],
        None => "",
    }
}
