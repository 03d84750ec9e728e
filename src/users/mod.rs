//! User business operations and their audit registration.
//!
//! [`UserService`] holds the plain CRUD logic and contains no audit code.
//! [`AuditedUsers`] is the decorator that routes each operation through an
//! [`AuditInterceptor`](crate::intercept::AuditInterceptor); which operations
//! produce records is decided by the registration table in [`operations`].

mod audited;
mod entity;
mod error;
pub mod operations;
mod repository;
mod seed;
mod service;

pub use audited::AuditedUsers;
pub use entity::User;
pub use error::ServiceError;
pub use repository::UserRepository;
pub use seed::{seed_users, SEED_USERS};
pub use service::{UserOperations, UserService};
