//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Domain errors (4xx)
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            AppError::Domain(ref domain_err) => {
                match domain_err {
                    // 404 Not Found - referenced entity id absent
                    DomainError::CollegeNotFound(id) => {
                        (StatusCode::NOT_FOUND, "college_not_found", Some(id.to_string()))
                    }
                    DomainError::StudentNotFound(id) => {
                        (StatusCode::NOT_FOUND, "student_not_found", Some(id.to_string()))
                    }
                    DomainError::EventNotFound(id) => {
                        (StatusCode::NOT_FOUND, "event_not_found", Some(id.to_string()))
                    }

                    // 409 Conflict - uniqueness violations
                    DomainError::DuplicateCollege(name) => {
                        (StatusCode::CONFLICT, "duplicate_college", Some(name.clone()))
                    }
                    DomainError::DuplicateStudent { email, .. } => {
                        (StatusCode::CONFLICT, "duplicate_student", Some(email.clone()))
                    }
                    DomainError::DuplicateRegistration { .. } => {
                        (StatusCode::CONFLICT, "duplicate_registration", None)
                    }
                    DomainError::DuplicateAttendance { .. } => {
                        (StatusCode::CONFLICT, "duplicate_attendance", None)
                    }
                    DomainError::DuplicateFeedback { .. } => {
                        (StatusCode::CONFLICT, "duplicate_feedback", None)
                    }

                    // 400 Bad Request - validation failures
                    DomainError::CollegeMismatch { .. } => {
                        (StatusCode::BAD_REQUEST, "college_mismatch", None)
                    }
                    DomainError::NotRegistered { .. } => {
                        (StatusCode::BAD_REQUEST, "not_registered", None)
                    }
                    DomainError::InvalidRating(value) => {
                        (StatusCode::BAD_REQUEST, "invalid_rating", Some(value.to_string()))
                    }
                    DomainError::InvalidStatus(value) => {
                        (StatusCode::BAD_REQUEST, "invalid_status", Some(value.clone()))
                    }
                    DomainError::InvalidDate(value) => {
                        (StatusCode::BAD_REQUEST, "invalid_date", Some(value.clone()))
                    }
                }
            }

            // 500 Internal Server Error
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
