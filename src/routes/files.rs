//! File serving routes
//!
//! Serves raw uploads and extracted images from the local directories.
//! Only flat file names are accepted; anything else is a 404.

use std::io;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::storage::IMAGE_URL_PREFIX;

/// Create the files router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/uploads/:filename", get(serve_upload))
        .route(&format!("{}/:filename", IMAGE_URL_PREFIX), get(serve_image))
}

/// GET /uploads/:filename
async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let data = state
        .storage()
        .read_upload(&filename)
        .await
        .map_err(|e| not_found(e, &filename))?;
    file_response(&filename, data, "no-cache")
}

/// GET /static/images/:filename
async fn serve_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let data = state
        .storage()
        .read_image(&filename)
        .await
        .map_err(|e| not_found(e, &filename))?;
    file_response(&filename, data, "public, max-age=3600")
}

fn not_found(e: io::Error, filename: &str) -> AppError {
    match e.kind() {
        io::ErrorKind::NotFound => AppError::NotFound(filename.to_string()),
        _ => AppError::Io(e),
    }
}

fn file_response(filename: &str, data: Vec<u8>, cache_control: &'static str) -> Result<Response> {
    let content_type = mime_guess::from_path(filename).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", filename),
        )
        .header(header::CACHE_CONTROL, cache_control)
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(e.to_string()))
}
