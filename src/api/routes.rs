//! API route configuration.

use crate::api::handlers::{health_handler, shorten_handler, stat_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`      - Create a short link
/// - `GET  /stat/{code}`  - Record and visit count for a short link
/// - `GET  /health`       - Health check
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stat/{code}", get(stat_handler))
        .route("/health", get(health_handler))
}
