//! Storage layer
//!
//! Records and users persisted through SeaORM.

/// Database storage module
pub mod database;

pub use database::Database;
