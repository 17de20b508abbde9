//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used
//! consistently across all backend modules, following the `thiserror` pattern.
//!
//! Every variant maps to an HTTP status and a client-facing message rendered
//! as `{"error": "<message>"}`. Client errors keep their message verbatim;
//! internal errors are logged in full but reach the client as a generic
//! message, so no stack traces or implementation details leak.

use thiserror::Error;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required input field is missing or empty.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("{0}")]
    MissingInput(String),

    /// The rate provider does not know the requested currency code.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid currency code")]
    UnknownCurrency,

    /// The rate provider failed (timeout, configuration, transport).
    ///
    /// The provider's message is passed through verbatim.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("{0}")]
    Provider(String),

    /// The user's balance is zero (or absent), so no exchange can be made.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// History filter with `start_date` after `end_date`.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("End date must be after start date")]
    InvalidDateRange,

    /// Invalid user input validation error.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("{0}")]
    InvalidInput(String),

    /// Requested resource not found.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("{0}")]
    NotFound(String),

    /// Configuration error during startup or environment loading.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_)
            | AppError::UnknownCurrency
            | AppError::Provider(_)
            | AppError::InsufficientBalance
            | AppError::InvalidDateRange
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing
    /// implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        // Full error detail goes to the server logs only.
        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_message() {
        assert_eq!(
            AppError::MissingInput("currency_code is required".to_string()).user_message(),
            "currency_code is required"
        );
        assert_eq!(AppError::UnknownCurrency.user_message(), "Invalid currency code");
        assert_eq!(AppError::InsufficientBalance.user_message(), "Insufficient balance");
        assert_eq!(
            AppError::InvalidDateRange.user_message(),
            "End date must be after start date"
        );
        assert_eq!(
            AppError::Provider("Exchange rate API timeout".to_string()).user_message(),
            "Exchange rate API timeout"
        );
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        assert_eq!(err.user_message(), "An internal error occurred");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InsufficientBalance.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound("Balance not found".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
