//! `SQLite` persistence for users.

use rusqlite::{params, OptionalExtension, Row};

use super::entity::User;
use crate::db::{Database, StoreError};

/// Save/find/delete access to the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new user or overwrite an existing one, returning the saved row.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn save(&self, user: User) -> Result<User, StoreError> {
        self.db
            .call(move |conn| {
                let id = match user.id {
                    Some(id) => {
                        conn.execute(
                            "INSERT INTO users (id, username, email, password)
                             VALUES (?1, ?2, ?3, ?4)
                             ON CONFLICT(id) DO UPDATE SET
                                username = excluded.username,
                                email = excluded.email,
                                password = excluded.password",
                            params![id, user.username, user.email, user.password],
                        )?;
                        id
                    }
                    None => {
                        conn.execute(
                            "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)",
                            params![user.username, user.email, user.password],
                        )?;
                        conn.last_insert_rowid()
                    }
                };
                Ok(user.with_id(id))
            })
            .await
    }

    /// All users ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        self.db
            .call(|conn| {
                let mut stmt =
                    conn.prepare("SELECT id, username, email, password FROM users ORDER BY id")?;
                let users = stmt
                    .query_map([], user_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(users)
            })
            .await
    }

    /// Look up one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.db
            .call(move |conn| {
                let user = conn
                    .query_row(
                        "SELECT id, username, email, password FROM users WHERE id = ?1",
                        params![id],
                        user_from_row,
                    )
                    .optional()?;
                Ok(user)
            })
            .await
    }

    /// Delete a user. Deleting a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.db
            .call(move |conn| {
                conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
                Ok(())
            })
            .await
    }

    /// Number of stored users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count(&self) -> Result<u64, StoreError> {
        self.db
            .call(|conn| {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
                Ok(count.unsigned_abs())
            })
            .await
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
    })
}
