//! Per-request context threaded explicitly into intercepted calls.

use std::net::SocketAddr;

use uuid::Uuid;

/// Caller information for one request.
///
/// Calls made outside a request (startup jobs, the CLI) use
/// [`RequestContext::detached`], which records an empty caller address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Uuid,
    caller_address: Option<String>,
}

impl RequestContext {
    /// Context for a request from the given network origin.
    #[must_use]
    pub fn new(caller_address: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            caller_address: Some(caller_address.into()),
        }
    }

    /// Context with no originating request.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            caller_address: None,
        }
    }

    /// Unique id of this request, used to correlate log lines.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Caller address, or the empty string when there is no request.
    #[must_use]
    pub fn caller_address(&self) -> &str {
        self.caller_address.as_deref().unwrap_or_default()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::detached()
    }
}

impl From<SocketAddr> for RequestContext {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip().to_string())
    }
}
