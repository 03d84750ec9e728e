//! Method Audit - method-level audit logging with declarative interception rules.
//!
//! Business operations are wrapped by an [`AuditInterceptor`](intercept::AuditInterceptor)
//! which, after each successful call, persists an
//! [`InvocationRecord`](audit::InvocationRecord) for every rule that matched the
//! operation: the layer-wide rule (every operation in an audited namespace) and
//! the tag-based rule (every operation carrying an action tag).

pub mod app;
pub mod audit;
pub mod config;
pub mod db;
pub mod display;
pub mod http;
pub mod intercept;
pub mod users;
