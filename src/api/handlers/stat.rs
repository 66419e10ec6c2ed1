//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stat::StatResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record and visit count for a short code.
///
/// # Endpoint
///
/// `GET /api/stat/{code}`
///
/// # Response
///
/// ```json
/// {
///   "short_url": "aB3xY9",
///   "original_url": "https://example.com",
///   "visit_count": 42,
///   "created_at": "2026-01-01T12:00:00Z",
///   "updated_at": "2026-01-02T08:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stat_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatResponse>, AppError> {
    let link = state.shortener.get_stat(&code).await?;

    Ok(Json(link.into()))
}
