//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Short link creation, resolution and stats

pub mod services;
