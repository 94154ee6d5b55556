//! SQLite-backed key-value backend.
//!
//! # Invariants
//! - Connections are opened through `db::open_db*`, so the `kv_entries`
//!   schema is migrated before first use.

use super::{BackendResult, StorageBackend};
use crate::db::{open_db, open_db_in_memory, DbError, DbResult, EntryOperation};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Durable backend storing one row per key in `kv_entries`.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps a connection that already went through `db::open_db*`.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl StorageBackend for SqliteBackend {
    fn read(&self, key: &str) -> BackendResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(DbError::entry(EntryOperation::Read, key))?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> BackendResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )
        .map_err(DbError::entry(EntryOperation::Write, key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])
            .map_err(DbError::entry(EntryOperation::Remove, key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteBackend;
    use crate::db::{DbError, EntryOperation};
    use crate::storage::{BackendError, StorageBackend};

    #[test]
    fn write_read_and_replace() {
        let backend = SqliteBackend::open_in_memory().expect("open in-memory db");
        assert_eq!(backend.read("todos_v1").expect("read"), None);

        backend.write("todos_v1", "[]").expect("insert");
        backend.write("todos_v1", "[1]").expect("replace");
        assert_eq!(
            backend.read("todos_v1").expect("read").as_deref(),
            Some("[1]")
        );
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let backend = SqliteBackend::open_in_memory().expect("open in-memory db");
        backend.remove("never-written").expect("remove absent key");
        backend.write("k", "v").expect("insert");
        backend.remove("k").expect("remove");
        assert_eq!(backend.read("k").expect("read"), None);
    }

    #[test]
    fn failed_write_reports_operation_and_key() {
        let backend = SqliteBackend::open_in_memory().expect("open in-memory db");
        let err = backend.write(" ", "[]").expect_err("blank key violates CHECK");
        match err {
            BackendError::Db(DbError::Entry { operation, key, .. }) => {
                assert_eq!(operation, EntryOperation::Write);
                assert_eq!(key, " ");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
