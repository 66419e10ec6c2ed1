//! ShortLink entity representing a code-to-URL mapping with its visit counter.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// `code` and `original_url` never change after creation. `visit_count` only
/// grows, and only through the visit increment; every increment also refreshes
/// `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub visit_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        visit_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            visit_count,
            created_at,
            updated_at,
        }
    }
}

/// Input data for persisting a new short link.
///
/// Identity, counter and timestamps are assigned by storage at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub code: String,
    pub original_url: String,
}

impl NewShortLink {
    pub fn new(code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_short_link_creation() {
        let now = Utc::now();
        let link = ShortLink::new(
            1,
            "aB3xY9".to_string(),
            "https://example.com".to_string(),
            0,
            now,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "aB3xY9");
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.created_at, link.updated_at);
        assert_eq!(link.visit_count, 0);
    }

    #[test]
    fn test_short_link_with_visits() {
        let created = Utc::now();
        let link = ShortLink::new(
            7,
            "zzz111".to_string(),
            "https://rust-lang.org".to_string(),
            3,
            created,
            created + Duration::seconds(5),
        );

        assert_eq!(link.visit_count, 3);
        assert!(link.updated_at > link.created_at);
    }

    #[test]
    fn test_new_short_link_accepts_str_and_string() {
        let from_str = NewShortLink::new("code01", "https://example.com");
        let from_string = NewShortLink::new("code01".to_string(), "https://example.com".to_string());

        assert_eq!(from_str, from_string);
        assert_eq!(from_str.code, "code01");
    }
}
