//! The durable store contract for invocation records.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::types::{InvocationRecord, NewInvocationRecord};
use crate::db::StoreError;

/// Append-only store for invocation records.
///
/// Each `save` is an independent unit of work that assigns the record's id.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Persist a record and return it with its id assigned.
    async fn save(&self, record: NewInvocationRecord) -> Result<InvocationRecord, StoreError>;
}

/// In-memory log store, mostly useful for tests and embedding.
#[derive(Debug)]
pub struct MemoryLogStore {
    records: Mutex<Vec<InvocationRecord>>,
    next_id: AtomicI64,
}

impl MemoryLogStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Snapshot of every stored record, in insertion order.
    pub async fn records(&self) -> Vec<InvocationRecord> {
        self.records.lock().await.clone()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Returns `true` if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl Default for MemoryLogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn save(&self, record: NewInvocationRecord) -> Result<InvocationRecord, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = record.into_record(id);
        self.records.lock().await.push(record.clone());
        Ok(record)
    }
}
