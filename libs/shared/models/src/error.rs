use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// A single rejected input field, reported back to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Duplicate professional id: {0}")]
    DuplicateProfessionalId(String),

    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateProfessionalId(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Error: {}: {}", status, self);
        } else {
            tracing::warn!("Rejected: {}: {}", status, self);
        }

        let body = match self {
            AppError::ValidationFailed(errors) => Json(json!(errors)),
            AppError::DuplicateProfessionalId(msg)
            | AppError::DuplicateEmail(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidCredentials(msg)
            | AppError::Database(msg) => Json(json!({ "error": msg })),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::DuplicateProfessionalId("crm".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::DuplicateEmail("email".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("Doctor not found".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ValidationFailed(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidCredentials("expired".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Database("timeout".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_response_status() {
        let error = AppError::ValidationFailed(vec![FieldError::new("name", "must not be blank")]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
