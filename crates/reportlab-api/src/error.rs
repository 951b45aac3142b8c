//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use reportlab_extractor::ExtractorError;
use reportlab_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Extraction or upload failure
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// Store could not be opened or queried
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Server is missing required configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed request (missing multipart field, unreadable body)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Extractor(ExtractorError::UnsupportedFormat(_))
            | ApiError::Extractor(ExtractorError::Extraction(_))
            | ApiError::Extractor(ExtractorError::InvalidInput(_))
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Extractor(ExtractorError::Config(_))
            | ApiError::Extractor(ExtractorError::Store(_))
            | ApiError::Store(_)
            | ApiError::Configuration(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("worker task failed: {}", e))
    }
}
