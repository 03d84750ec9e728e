//! Audit records for intercepted method invocations and the stores that persist them.

mod logger;
mod render;
mod store;
mod types;

pub use logger::AuditLog;
pub use render::{render_arguments, render_return, AuditValue, NULL_LITERAL};
pub use store::{LogStore, MemoryLogStore};
pub use types::{InvocationRecord, InvocationRecordBuilder, NewInvocationRecord};
