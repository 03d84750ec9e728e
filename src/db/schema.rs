//! Database schema for users and invocation records.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: u32 = 1;

/// SQL schema for the application database.
///
/// `arguments` and `return_value` hold full renderings; SQLite `TEXT` has no
/// length cap so renderings well past 2000 characters fit.
pub const SCHEMA: &str = r"
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS invocation_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    method_name TEXT NOT NULL,
    arguments TEXT NOT NULL,
    caller_address TEXT NOT NULL DEFAULT '',
    timestamp TEXT NOT NULL,
    return_value TEXT NOT NULL,
    action TEXT
);

-- Records are append-only
CREATE TRIGGER IF NOT EXISTS invocation_records_no_update
BEFORE UPDATE ON invocation_records
BEGIN
    SELECT RAISE(ABORT, 'invocation records are immutable');
END;

CREATE TRIGGER IF NOT EXISTS invocation_records_no_delete
BEFORE DELETE ON invocation_records
BEGIN
    SELECT RAISE(ABORT, 'invocation records are immutable');
END;

CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_invocation_records_timestamp ON invocation_records(timestamp);
CREATE INDEX IF NOT EXISTS idx_invocation_records_method_name ON invocation_records(method_name);
CREATE INDEX IF NOT EXISTS idx_invocation_records_action ON invocation_records(action);
";

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_schema_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        assert!(table_exists(&conn, "users"));
        assert!(table_exists(&conn, "invocation_records"));
        assert!(table_exists(&conn, "schema_version"));
    }

    #[test]
    fn test_schema_creates_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        for index_name in [
            "idx_invocation_records_timestamp",
            "idx_invocation_records_method_name",
            "idx_invocation_records_action",
        ] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?",
                    [index_name],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Index {index_name} should exist");
        }
    }

    #[test]
    fn test_invocation_records_reject_update_and_delete() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO invocation_records (method_name, arguments, timestamp, return_value)
             VALUES ('createUser', '[]', datetime('now'), 'null')",
            [],
        )
        .unwrap();

        let update = conn.execute(
            "UPDATE invocation_records SET action = 'TAMPERED'",
            [],
        );
        assert!(update.is_err());

        let delete = conn.execute("DELETE FROM invocation_records", []);
        assert!(delete.is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM invocation_records", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        assert!(table_exists(&conn, "invocation_records"));
    }
}
