//! SQLite bootstrap for the durable key-value backend.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by `storage::SqliteBackend`.
//! - Apply schema migrations in deterministic order.
//! - Describe failures by stage: opening, migrating, or touching one entry.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No key-value reads/writes happen before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Row-level operation on the `kv_entries` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOperation {
    Read,
    Write,
    Remove,
}

impl EntryOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Remove => "remove",
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    /// Connection could not be opened or configured.
    Open(rusqlite::Error),
    /// `PRAGMA user_version` could not be read.
    SchemaVersion(rusqlite::Error),
    /// Applying the migration that targets `version` failed; nothing was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The database was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A `kv_entries` statement for `key` failed.
    Entry {
        operation: EntryOperation,
        key: String,
        source: rusqlite::Error,
    },
}

impl DbError {
    /// Builds a mapper for `map_err` on a statement touching `key`.
    pub fn entry(operation: EntryOperation, key: &str) -> impl FnOnce(rusqlite::Error) -> Self + '_ {
        move |source| Self::Entry {
            operation,
            key: key.to_string(),
            source,
        }
    }

    /// The storage key involved, for entry-level failures.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Entry { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open key-value database: {err}"),
            Self::SchemaVersion(err) => write!(f, "failed to read schema version: {err}"),
            Self::Migration { version, source } => {
                write!(f, "migration to schema version {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Entry {
                operation,
                key,
                source,
            } => write!(
                f,
                "kv_entries {} failed for key `{key}`: {source}",
                operation.as_str()
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::SchemaVersion(err) => Some(err),
            Self::Migration { source, .. } | Self::Entry { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}
