//! Repository implementations.
//!
//! Concrete implementations of domain repository traits on top of the
//! [`crate::infrastructure::storage`] engine.
//!
//! - [`SqliteLinkRepository`] - Short link storage, lookup and visit counting

pub mod sqlite_link_repository;

pub use sqlite_link_repository::SqliteLinkRepository;
