//! Storage engine.
//!
//! [`SqliteStorage`] owns the connection pool and the SQL. It reports
//! engine-level outcomes through [`StorageError`]; domain translation happens
//! one layer up in [`crate::infrastructure::persistence`].

pub mod sqlite_storage;

pub use sqlite_storage::{SqliteStorage, StorageError, StorageOptions};
