//! Error types for the extraction server

use axum::{
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentFormat;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Failures surfaced at the HTTP boundary
///
/// Extractor failures never show up here; they are reported as degraded
/// stages inside a successful response.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("File type not allowed (allowed: {allowed})")]
    UnsupportedFormat { allowed: String },

    #[error("File too large (limit is {limit} bytes)")]
    PayloadTooLarge { limit: usize },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn unsupported(allowed: &[DocumentFormat]) -> Self {
        AppError::UnsupportedFormat {
            allowed: allowed
                .iter()
                .map(DocumentFormat::extension)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::EmptyFilename
            | AppError::UnsupportedFormat { .. }
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A request that is not `multipart/form-data` carries no file part
impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Upload is not a multipart form");
        AppError::MissingFile
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
