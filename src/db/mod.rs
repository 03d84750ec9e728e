//! SQLite storage shared by the audit log and the user repository.

mod connection;
mod error;
mod schema;

pub use connection::{default_database_path, Database};
pub use error::StoreError;
pub use schema::{SCHEMA, SCHEMA_VERSION};
