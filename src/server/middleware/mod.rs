//! HTTP middleware implementations
//!
//! - Request ID tracking
//! - API token authentication

mod api_token;
mod request_id;

pub use api_token::{ApiTokenMiddleware, ApiTokenMiddlewareService, extract_token};
pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware, RequestIdMiddlewareService};
