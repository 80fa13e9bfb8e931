//! Error handling for the Surf Report service
//!
//! Every failure of the refresh/view pipeline ends up here. Hard failures map
//! to non-200 status codes; an exhausted quota is advisory and stays 200.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use shared::DecodeError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Upstream errors
    #[error("Weather API request failed: {0}")]
    Network(String),

    // Snapshot file errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    // Advisory
    #[error("Daily quota exhausted: {requests_made} of {daily_limit} requests used")]
    QuotaExceeded { requests_made: u32, daily_limit: i64 },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error detail rendered to clients
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::QuotaExceeded { .. } => StatusCode::OK,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        let (code, message) = match self {
            AppError::Network(msg) => (
                "NETWORK_ERROR",
                format!("Could not reach the weather API: {}", msg),
            ),
            AppError::Storage(msg) => (
                "STORAGE_ERROR",
                format!("Could not access the cached snapshot: {}", msg),
            ),
            AppError::Decode(err) => ("DECODE_ERROR", err.to_string()),
            AppError::QuotaExceeded { daily_limit, .. } => (
                "QUOTA_EXCEEDED",
                format!(
                    "The weather API is blocked for today, come back tomorrow for {} more requests",
                    daily_limit
                ),
            ),
            AppError::Configuration(msg) => (
                "CONFIGURATION_ERROR",
                format!("Configuration error: {}", msg),
            ),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        };
        ErrorDetail { code, message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(code = detail.code, "Error: {:?}", self);
        } else {
            tracing::warn!(code = detail.code, "{}", self);
        }

        (status, format!("{}: {}", detail.code, detail.message)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
