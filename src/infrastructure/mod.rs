//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`storage`] - SQLite storage engine (pool, schema, atomic statements)
//! - [`persistence`] - Repository implementations mapping storage outcomes to domain errors

pub mod persistence;
pub mod storage;
