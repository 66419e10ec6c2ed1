//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be HTTP/HTTPS).
    #[validate(length(min = 1, max = 2048), url(message = "Invalid URL format"))]
    pub url: String,
}

/// Response carrying the generated short code.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}
