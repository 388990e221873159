//! Axum router for the mock data API.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers::{get_data, post_data};

/// Build and return the full Axum router.
pub fn build_router() -> Router {
    Router::new()
        .route("/api/data", get(get_data).post(post_data))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
