//! Helper functions shared across layers.
//!
//! - [`code_generator`] - Secure random short code generation
//! - [`db_error`] - SQLx error classification
//! - [`url_validator`] - Syntactic URL validation for the HTTP boundary

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
