//! Helper functions for creating specific error types

use super::types::ApiError;
use crate::core::validation::ValidationErrors;

/// Helper functions for creating specific errors
impl ApiError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn method_not_allowed<S: Into<String>>(message: S) -> Self {
        Self::MethodNotAllowed(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unresolved_reference<S: Into<String>>(message: S) -> Self {
        Self::UnresolvedReference(message.into())
    }

    pub fn failed_dependency<S: Into<String>>(message: S) -> Self {
        Self::FailedDependency(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Single-field validation failure
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        let mut errors = ValidationErrors::default();
        errors.add(field, message);
        Self::Validation(errors)
    }

    /// Whether the error was caused by the caller rather than the service
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
