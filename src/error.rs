//! Custom error types and handling
//!
//! This module defines the HTTP-facing error type and implements
//! conversion to HTTP responses for the Axum framework.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::catalog_service::CatalogError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Data file errors
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to load progress: {0}")]
    SnapshotRead(String),

    #[error("Failed to save progress: {0}")]
    SnapshotWrite(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Catalog(_) => "CATALOG_ERROR",
            Self::SnapshotRead(_) | Self::SnapshotWrite(_) => "SNAPSHOT_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Catalog(_) | Self::SnapshotRead(_) | Self::SnapshotWrite(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log data file errors but don't expose paths or parser output to clients
        let message = match &self {
            AppError::Catalog(e) => {
                tracing::error!("Error reading catalog: {}", e);
                "Failed to load problems".to_string()
            }
            AppError::SnapshotRead(e) => {
                tracing::error!("Error reading progress snapshot: {}", e);
                "Failed to load progress".to_string()
            }
            AppError::SnapshotWrite(e) => {
                tracing::error!("Error writing progress snapshot: {}", e);
                "Failed to save progress".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: self.error_code(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("Problem not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::SnapshotWrite("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::InvalidInput("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_message_is_passed_through() {
        let err = AppError::NotFound("Problem not found".into());
        assert_eq!(err.to_string(), "Problem not found");
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
