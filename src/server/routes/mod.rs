//! HTTP routes
//!
//! Everything under the API prefix goes to the REST dispatcher except the
//! batch endpoint.

pub mod batch;
pub mod rest;

use crate::core::rest::{AuthUser, RequestContext};
use crate::server::middleware::REQUEST_ID_HEADER;
use crate::utils::error::{ApiError, Result};
use crate::utils::generate_request_id;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use serde_json::Value;

/// Mount the API scope at `prefix` (`""` for the root)
pub fn configure_routes(
    prefix: String,
    batch_path: String,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope(&prefix)
                .service(
                    web::resource(format!("/{}", batch_path))
                        .route(web::post().to(batch::execute_batch))
                        .default_service(web::to(batch::method_not_allowed)),
                )
                .default_service(web::to(rest::dispatch)),
        );
    }
}

/// Context of an incoming HTTP request: its ID plus the authenticated user
pub fn request_context(req: &HttpRequest) -> RequestContext {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user = req.extensions().get::<AuthUser>().cloned();
    RequestContext::new(request_id).with_user(user)
}

/// JSON body of a request; an empty body is `null`
pub fn parse_body(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Malformed JSON body: {}", e)))
}

/// Render `error` as the standard JSON error body tagged with `request_id`
pub fn error_response(error: &ApiError, request_id: &str) -> HttpResponse {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!(request_id = %request_id, error = %error, "Request failed");
    }
    HttpResponse::build(status).json(error.to_error_response(Some(request_id)))
}
