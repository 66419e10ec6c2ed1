//! Repository trait for short link persistence.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::error::LinkError;
use async_trait::async_trait;

/// Repository interface for storing and resolving short links.
///
/// Implementations translate storage-engine signals into [`LinkError`]
/// variants so the service never sees engine-specific errors.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new short link.
    ///
    /// The uniqueness of `code` is decided by the storage engine at insert
    /// time; there is no prior existence check.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Conflict`] if the code already exists.
    /// Returns [`LinkError::Failure`] on any other storage error.
    async fn save(&self, new_link: NewShortLink) -> Result<ShortLink, LinkError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no link has this code.
    /// Returns [`LinkError::Failure`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<ShortLink, LinkError>;

    /// Atomically increments the visit counter and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no row matched the code.
    /// Returns [`LinkError::Failure`] on storage errors.
    async fn increment_visits(&self, code: &str) -> Result<(), LinkError>;

    /// Releases the underlying storage handle.
    async fn close(&self) -> Result<(), LinkError>;
}
