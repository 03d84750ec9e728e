//! HTTP surface over the audited user operations.
//!
//! Each request builds a [`RequestContext`](crate::intercept::RequestContext)
//! from the TCP peer address, so records carry the caller's IP.

mod api;
mod error;
mod handlers;
mod server;

pub use api::{ActionResponse, ErrorResponse};
pub use error::{ApiError, ServerError};
pub use handlers::AppState;
pub use server::ApiServer;
