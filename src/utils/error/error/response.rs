//! HTTP response handling for errors

use super::types::ApiError;
use crate::core::validation::ValidationErrors;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ApiError {
    /// HTTP status this error renders as
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) | ApiError::UnresolvedReference(_) => StatusCode::BAD_REQUEST,
            ApiError::Serialization(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::FailedDependency(_) => StatusCode::FAILED_DEPENDENCY,
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Config(_)
            | ApiError::Database(_)
            | ApiError::Yaml(_)
            | ApiError::Io(_)
            | ApiError::Crypto(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Serialization(_) => "PARSING_ERROR",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::UnresolvedReference(_) => "UNRESOLVED_REFERENCE",
            ApiError::FailedDependency(_) => "FAILED_DEPENDENCY",
            ApiError::Timeout(_) => "TIMEOUT",
            ApiError::Yaml(_) | ApiError::Io(_) | ApiError::Crypto(_) | ApiError::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Message safe to show to API callers
    fn public_message(&self) -> String {
        match self {
            ApiError::Database(_) => "Database operation failed".to_string(),
            ApiError::Yaml(_) | ApiError::Io(_) | ApiError::Crypto(_) | ApiError::Internal(_) => {
                "An internal error occurred".to_string()
            }
            ApiError::Validation(errors) => errors.summary(),
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::Conflict(msg)
            | ApiError::UnresolvedReference(msg)
            | ApiError::FailedDependency(msg)
            | ApiError::Timeout(msg) => msg.clone(),
            _ => self.to_string(),
        }
    }

    /// Build the JSON error body, tagged with the originating request when known
    pub fn to_error_response(&self, request_id: Option<&str>) -> ErrorResponse {
        let validation = match self {
            ApiError::Validation(errors) => Some(errors.clone()),
            _ => None,
        };

        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.public_message(),
                timestamp: chrono::Utc::now().timestamp(),
                request_id: request_id.map(str::to_string),
                validation,
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        ApiError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        HttpResponse::build(ApiError::status_code(self)).json(self.to_error_response(None))
    }
}

/// Standard error response format
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationErrors>,
}
