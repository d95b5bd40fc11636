//! Upload Routes
//!
//! Endpoints:
//! - POST /upload - Upload a document and extract its text and images
//! - POST /api/upload - Same handler, under the path the web frontend uses

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::document::Degradation;
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::storage::{image_prefix, stored_name};

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    /// Name the document was stored under
    pub filename: String,
    /// Text preview, cut at the configured number of characters
    pub text: String,
    /// Character count of the full extracted text
    pub text_length: usize,
    /// URLs of the extracted images, in source order
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<Degradation>,
}

// ============================================================================
// Router
// ============================================================================

/// Create the upload router
///
/// The body limit is the configured upload maximum; the multipart framing
/// counts against it too.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/api/upload", post(upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /upload
///
/// Persist the `file` part, then extract text and images from it.
async fn upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart?;
    let max_bytes = state.config().upload.max_bytes;
    let (declared, data) = read_file_field(&mut multipart, max_bytes).await?;

    if declared.is_empty() {
        return Err(AppError::EmptyFilename);
    }

    let extraction = state.extraction();
    let format = extraction
        .classify(&declared)
        .ok_or_else(|| AppError::unsupported(extraction.allowed_formats()))?;

    let stored = stored_name(&declared, format);
    let path = state.storage().save_upload(&stored, &data).await?;

    tracing::info!(
        declared = %declared,
        stored = %stored,
        format = %format,
        bytes = data.len(),
        "Upload received"
    );

    let prefix = image_prefix(&stored).to_string();
    let result = tokio::task::spawn_blocking(move || extraction.extract(&path, format, &prefix))
        .await
        .map_err(|e| AppError::Internal(format!("Extraction task failed: {}", e)))?;

    let full_text = result.text();
    let preview_chars = state.config().upload.text_preview_chars;

    Ok(Json(UploadResponse {
        message: "File uploaded and processed successfully",
        filename: stored,
        text: preview_text(full_text, preview_chars),
        text_length: full_text.chars().count(),
        images: result.images().iter().map(|image| image.url.clone()).collect(),
        degraded: result.degradations(),
    }))
}

/// Find the `file` part and read it whole
///
/// Parts named `file` without a filename are form values, not uploads,
/// and are skipped like any other field.
async fn read_file_field(multipart: &mut Multipart, max_bytes: usize) -> Result<(String, Bytes)> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error(max_bytes))? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await.map_err(multipart_error(max_bytes))?;
        if data.len() > max_bytes {
            return Err(AppError::PayloadTooLarge { limit: max_bytes });
        }
        return Ok((file_name, data));
    }

    Err(AppError::MissingFile)
}

fn multipart_error(max_bytes: usize) -> impl Fn(MultipartError) -> AppError {
    move |e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge { limit: max_bytes }
        } else {
            AppError::BadRequest(e.body_text())
        }
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn preview_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
