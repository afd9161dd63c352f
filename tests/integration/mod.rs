//! Integration tests
//!
//! HTTP round trips through the full Actix application over an in-memory database.

mod batch_tests;
mod config_tests;
mod rest_tests;
mod user_tests;
