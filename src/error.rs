use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::clients::OpenAiError;

/// Caller-visible failures of the HTTP surface.
///
/// The variants carry the diagnostic detail; the response bodies stay
/// generic, matching the error taxonomy: not-found and bad uploads are the
/// caller's business, upstream extraction failures are not.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request {0} not found")]
    NotFound(Uuid),
    #[error("unsupported upload content type {0:?}")]
    UnsupportedContentType(String),
    #[error("invalid multipart upload: {0}")]
    InvalidUpload(String),
    #[error(transparent)]
    Extraction(#[from] OpenAiError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Request not found"),
            ApiError::UnsupportedContentType(_) => {
                (StatusCode::BAD_REQUEST, "Only PDF files are supported.")
            }
            ApiError::InvalidUpload(_) => (StatusCode::BAD_REQUEST, "Invalid upload."),
            ApiError::Extraction(cause) => {
                // Diagnostics stay in the log; the caller gets a generic message.
                error!(%cause, "Offer extraction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse offer document.",
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
