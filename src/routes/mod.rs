//! Route modules for the extraction server

pub mod files;
pub mod health;
pub mod upload;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn router(state: AppState) -> Router {
    // The web frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload_bytes = state.config().upload.max_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .merge(upload::router(max_upload_bytes))
        .merge(files::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
