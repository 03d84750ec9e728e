//! Method interception: which operations are audited and how.
//!
//! # Components
//!
//! - [`ActionTag`]: declarative action label attached to one operation
//! - [`Operation`]: static descriptor of an interceptable operation
//! - [`InterceptionPolicy`]: the layer-wide and tag-based matching rules
//! - [`InterceptionRegistry`]: per-operation matches, computed once at startup
//! - [`AuditInterceptor`]: wraps a call and records it after a normal return
//! - [`RequestContext`]: explicit per-request caller information

mod context;
mod interceptor;
mod policy;
mod tag;

pub use context::*;
pub use interceptor::*;
pub use policy::*;
pub use tag::*;
