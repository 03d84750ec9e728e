//! `SQLite`-backed audit log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use super::store::LogStore;
use super::types::{InvocationRecord, NewInvocationRecord};
use crate::db::{Database, StoreError};

const SELECT_COLUMNS: &str =
    "SELECT id, method_name, arguments, caller_address, timestamp, return_value, action
     FROM invocation_records";

/// Durable audit log over the shared database.
///
/// Exposes append (`save`) plus read-only reporting queries; nothing here
/// edits or deletes a stored record.
#[derive(Debug, Clone)]
pub struct AuditLog {
    db: Database,
}

impl AuditLog {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Most recent records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent(&self, limit: usize) -> Result<Vec<InvocationRecord>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.db
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "{SELECT_COLUMNS} ORDER BY id DESC LIMIT ?1"
                ))?;
                let records = stmt
                    .query_map(params![limit], record_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(records)
            })
            .await
    }

    /// Records for one method, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn for_method(
        &self,
        method_name: impl Into<String>,
    ) -> Result<Vec<InvocationRecord>, StoreError> {
        let method_name = method_name.into();
        self.db
            .call(move |conn| {
                let mut stmt =
                    conn.prepare(&format!("{SELECT_COLUMNS} WHERE method_name = ?1 ORDER BY id"))?;
                let records = stmt
                    .query_map(params![method_name], record_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(records)
            })
            .await
    }

    /// Count total records.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count(&self) -> Result<u64, StoreError> {
        self.db
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM invocation_records", [], |row| {
                        row.get(0)
                    })?;
                Ok(count.unsigned_abs())
            })
            .await
    }

    /// Count records carrying the given action label.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_by_action(&self, action: impl Into<String>) -> Result<u64, StoreError> {
        let action = action.into();
        self.db
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM invocation_records WHERE action = ?1",
                    params![action],
                    |row| row.get(0),
                )?;
                Ok(count.unsigned_abs())
            })
            .await
    }
}

#[async_trait]
impl LogStore for AuditLog {
    async fn save(&self, record: NewInvocationRecord) -> Result<InvocationRecord, StoreError> {
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO invocation_records
                        (method_name, arguments, caller_address, timestamp, return_value, action)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        record.method_name,
                        record.arguments,
                        record.caller_address,
                        record.timestamp.to_rfc3339(),
                        record.return_value,
                        record.action,
                    ],
                )?;
                let id = conn.last_insert_rowid();
                Ok(record.into_record(id))
            })
            .await
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<InvocationRecord> {
    let id: i64 = row.get(0)?;
    let timestamp: String = row.get(4)?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let pending = NewInvocationRecord {
        method_name: row.get(1)?,
        arguments: row.get(2)?,
        caller_address: row.get(3)?,
        timestamp,
        return_value: row.get(5)?,
        action: row.get(6)?,
    };
    Ok(pending.into_record(id))
}
