//! Type conversions for ApiError

use super::types::ApiError;
use sea_orm::{DbErr, SqlErr};

// Unique violations are the caller's problem (duplicate key), everything else is ours.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                ApiError::Conflict(format!("Duplicate entry: {}", detail))
            }
            _ => ApiError::Database(err),
        }
    }
}

impl From<crate::core::validation::ValidationErrors> for ApiError {
    fn from(errors: crate::core::validation::ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<actix_web::error::PayloadError> for ApiError {
    fn from(err: actix_web::error::PayloadError) -> Self {
        ApiError::BadRequest(format!("Invalid request payload: {}", err))
    }
}
