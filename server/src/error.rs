//! Unified error handling for the server.

use crate::source::SourceError;
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Local source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        AppError::SourceUnavailable(e.to_string())
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Store error".to_string(),
                    None,
                )
            }
            AppError::SourceUnavailable(msg) => {
                tracing::warn!("Source unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Photo source unavailable".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
