//! Core domain entities.
//!
//! The service has a single entity, [`ShortLink`], plus the [`NewShortLink`]
//! input used to create it. Entities are plain data structures; identity,
//! counters and timestamps are owned by the storage engine.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
