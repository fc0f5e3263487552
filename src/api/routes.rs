//! API route definitions

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Question answering
        .route("/query", post(handlers::query))
        // Document endpoints
        .route(
            "/upload",
            post(handlers::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/documents", post(handlers::list_documents))
        // Retrieval service notifications
        .route("/webhook", post(handlers::receive_webhook))
        .with_state(state)
}
