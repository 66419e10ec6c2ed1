//! DTOs for link statistics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShortLink;

/// Full record of a short link. Timestamps serialize as RFC 3339.
#[derive(Debug, Serialize)]
pub struct StatResponse {
    pub short_url: String,
    pub original_url: String,
    pub visit_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShortLink> for StatResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            short_url: link.code,
            original_url: link.original_url,
            visit_count: link.visit_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
