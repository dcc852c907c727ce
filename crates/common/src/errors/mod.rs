//! Error types for DataForge services
//!
//! Provides a comprehensive error handling system with:
//! - Distinct error types for different failure modes
//! - HTTP status code mapping
//! - Structured error responses
//! - Error codes for client handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,

    // Resource errors (4xxx)
    DatasetNotFound,

    // Database errors (7xxx)
    DatabaseError,
    ConnectionError,

    // Recommendation errors (8xxx)
    RetrievalError,
    InvalidCandidate,

    // Internal errors (9xxx)
    InternalError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::DatasetNotFound => 4002,
            ErrorCode::DatabaseError => 7001,
            ErrorCode::ConnectionError => 7002,
            ErrorCode::RetrievalError => 8001,
            ErrorCode::InvalidCandidate => 8002,
            ErrorCode::InternalError => 9001,
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>
    },

    // Resource errors
    #[error("Dataset not found: {id}")]
    DatasetNotFound { id: i32 },

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database connection error: {message}")]
    DatabaseConnection { message: String },

    // Recommendation errors
    #[error("Candidate retrieval failed: {message}")]
    Retrieval { message: String },

    #[error("Invalid candidate dataset {dataset_id}: {message}")]
    InvalidCandidate { dataset_id: i32, message: String },

    // Internal errors
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::DatasetNotFound { .. } => ErrorCode::DatasetNotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::DatabaseConnection { .. } => ErrorCode::ConnectionError,
            AppError::Retrieval { .. } => ErrorCode::RetrievalError,
            AppError::InvalidCandidate { .. } => ErrorCode::InvalidCandidate,
            AppError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,

            AppError::DatasetNotFound { .. } => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            AppError::Database(_) |
            AppError::DatabaseConnection { .. } |
            AppError::InvalidCandidate { .. } |
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,

            // Catalog store unreachable
            AppError::Retrieval { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let details = match &self {
            AppError::Validation { field: Some(field), .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
