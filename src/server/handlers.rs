//! HTTP route handlers outside the API scope

use crate::server::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

/// Health check endpoint handler
///
/// 200 when the database answers, 503 otherwise.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = state.database.health_check().await.is_ok();
    let body = json!({
        "status": if database { "healthy" } else { "degraded" },
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    });

    if database {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Fallback for paths outside the API prefix
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    let error = ApiError::not_found(format!("No route for {}", req.path()));
    HttpResponse::NotFound().json(error.to_error_response(None))
}
