//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::infrastructure::persistence::SqliteLinkRepository;
use crate::infrastructure::storage::SqliteStorage;

/// The service wired with its production repository and generator.
pub type Shortener = ShortenerService<SqliteLinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<Shortener>,
    pub storage: Arc<SqliteStorage>,
}

impl AppState {
    pub fn new(shortener: Arc<Shortener>, storage: Arc<SqliteStorage>) -> Self {
        Self { shortener, storage }
    }
}
