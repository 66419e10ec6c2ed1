//! # shortlink
//!
//! A URL shortener that maps long URLs to random short codes, resolves them
//! back, and counts visits.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The `ShortLink` entity, repository trait and error outcomes
//! - **Application Layer** ([`application`]) - Creation with collision retry, resolution, stats
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite storage engine and repository
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Guarantees
//!
//! - Codes are drawn from the OS CSPRNG over a 62-character alphabet
//! - Code uniqueness is enforced by the storage engine at insert time
//! - Visit counters are incremented by a single atomic statement
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://shortlink.db"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RetryPolicy, ShortenerService};
    pub use crate::domain::LinkError;
    pub use crate::domain::entities::{NewShortLink, ShortLink};
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::SqliteLinkRepository;
    pub use crate::infrastructure::storage::{SqliteStorage, StorageError, StorageOptions};
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
}
