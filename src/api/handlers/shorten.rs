//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::validate_url;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "short_url": "aB3xY9" }
/// ```
///
/// Shortening the same URL twice returns two different codes.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON, or if the URL is
/// missing, malformed, or not HTTP/HTTPS.
/// Returns 500 Internal Server Error if the link cannot be stored.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    validate_url(&payload.url).map_err(|e| {
        AppError::bad_request(
            "Invalid URL format. URL must start with http:// or https://",
            json!({ "reason": e.to_string() }),
        )
    })?;

    let link = state.shortener.create(&payload.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: link.code,
        }),
    ))
}
