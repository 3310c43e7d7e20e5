//! HTTP routes.

use axum::{routing::get, Router};

/// Create all HTTP routes.
pub fn routes() -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
