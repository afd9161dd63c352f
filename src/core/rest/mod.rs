//! Generic REST layer
//!
//! One routing table ([`ResourceRegistry`]) and one handler chain
//! ([`RestDispatcher`]) serve both direct HTTP calls and batch sub-requests.

mod dispatcher;
pub mod records;
mod request;
mod resource;
mod router;
pub mod users;

pub use dispatcher::RestDispatcher;
pub use request::{
    AuthUser, HttpMethod, RequestContext, RestRequest, RestResponse, parse_query,
};
pub use resource::{RESERVED_ATTRIBUTES, ResourceDefinition, ResourceRegistry};
pub use router::{Route, match_route};
