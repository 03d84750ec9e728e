//! Service error types.

use crate::db::StoreError;

/// Errors returned by user operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),
}
