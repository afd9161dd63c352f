//! Batch endpoint

use super::{error_response, parse_body, request_context};
use crate::core::batch::{BatchOutcome, parent_path, parse_submission};
use crate::server::AppState;
use crate::utils::error::{ApiError, Result};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

/// `POST {prefix}/{batch_path}`
///
/// Envelope errors are rejected as a whole; once the batch runs the answer
/// is always a multi-status list, one entry per sub-request.
pub async fn execute_batch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    let context = request_context(&req);

    let result: Result<BatchOutcome> = async {
        let payload = parse_body(&body)?;
        let submission = parse_submission(payload, state.config.batch())?;
        let endpoint = state.config.batch_endpoint();
        state
            .orchestrator
            .execute(submission, parent_path(&endpoint), &context)
            .await
    }
    .await;

    match result {
        Ok(outcome) => {
            info!(
                request_id = %context.request_id,
                "Batch finished with {} response(s)",
                outcome.responses.len()
            );
            let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::MULTI_STATUS);
            HttpResponse::build(status).json(outcome.to_body())
        }
        Err(e) => error_response(&e, &context.request_id),
    }
}

/// Any method other than POST on the batch path
pub async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    let context = request_context(&req);
    let error = ApiError::method_not_allowed(format!(
        "Method {} is not allowed on {}",
        req.method(),
        req.path()
    ));
    error_response(&error, &context.request_id)
}
