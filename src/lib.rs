//! # restapi-rs
//!
//! A generic CRUD REST service over configurable record collections, with a
//! batch endpoint that runs several write requests in one call.
//!
//! ## Features
//!
//! - **Generic resources**: collections declared in configuration, stored as
//!   JSON documents, with fillable/hidden attributes and validation rules
//! - **Token auth**: built-in `users` collection issuing hashed API tokens
//! - **Batch requests**: ordered sub-requests with `$(N.field)` references to
//!   earlier responses and optional all-or-nothing execution
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use restapi_rs::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/restapi.yaml").await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{BatchOrchestrator, BatchOutcome, BatchSubmission, SubResponse};
pub use core::rest::{RequestContext, RestDispatcher, RestRequest, RestResponse};
pub use utils::error::{ApiError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
