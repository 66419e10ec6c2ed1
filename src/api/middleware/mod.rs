//! HTTP middleware for request processing.

pub mod tracing;
