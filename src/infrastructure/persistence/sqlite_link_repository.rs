//! SQLite implementation of link repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::error::LinkError;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::storage::{SqliteStorage, StorageError};

/// Link repository backed by [`SqliteStorage`].
///
/// Translates [`StorageError`] into [`LinkError`]: a uniqueness violation
/// becomes `Conflict`, a missing row or an empty code becomes `NotFound`, and
/// everything else is an opaque `Failure`.
pub struct SqliteLinkRepository {
    storage: Arc<SqliteStorage>,
}

impl SqliteLinkRepository {
    /// Creates a new repository over a shared storage handle.
    pub fn new(storage: Arc<SqliteStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn save(&self, new_link: NewShortLink) -> Result<ShortLink, LinkError> {
        match self.storage.save(&new_link).await {
            Ok(link) => Ok(link),
            Err(StorageError::Unique) => Err(LinkError::conflict(new_link.code)),
            Err(e) => Err(LinkError::failure("failed to save short link", e)),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<ShortLink, LinkError> {
        match self.storage.find_by_code(code).await {
            Ok(link) => Ok(link),
            Err(StorageError::NotFound | StorageError::EmptyCode) => {
                Err(LinkError::not_found(code))
            }
            Err(e) => Err(LinkError::failure("failed to look up short link", e)),
        }
    }

    async fn increment_visits(&self, code: &str) -> Result<(), LinkError> {
        match self.storage.increment_visits(code).await {
            Ok(()) => Ok(()),
            Err(StorageError::NoRowsUpdated | StorageError::NotFound | StorageError::EmptyCode) => {
                Err(LinkError::not_found(code))
            }
            Err(e) => Err(LinkError::failure("failed to increment visit count", e)),
        }
    }

    async fn close(&self) -> Result<(), LinkError> {
        self.storage.close().await;
        Ok(())
    }
}
