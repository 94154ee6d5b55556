//! Durable key-value storage boundary.
//!
//! # Responsibility
//! - Define the injected backend capability (`StorageBackend`).
//! - Provide in-memory, SQLite and unavailable backend implementations.
//! - Contain every storage failure inside `DurableStore`.
//!
//! # Invariants
//! - Backend errors never cross the `DurableStore` boundary.
//! - Each storage key is owned by at most one live state container.

mod durable;
mod memory;
mod sqlite;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use durable::{DurableStore, KeyClaim, StoreError};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

pub type BackendResult<T> = Result<T, BackendError>;

/// Host capability for string-keyed, string-valued persistence.
///
/// Implementations may fail on any call; `DurableStore` decides how failures
/// are absorbed. Availability is sampled once when a `DurableStore` is built.
pub trait StorageBackend {
    /// Whether a durable store is reachable in this execution context.
    fn is_available(&self) -> bool {
        true
    }

    /// Returns the stored value, or `None` when the key is absent.
    fn read(&self, key: &str) -> BackendResult<Option<String>>;

    /// Inserts or replaces the value under `key`.
    fn write(&self, key: &str, value: &str) -> BackendResult<()>;

    /// Deletes `key`. Absent keys are not an error.
    fn remove(&self, key: &str) -> BackendResult<()>;
}

/// Backend-level failures.
#[derive(Debug)]
pub enum BackendError {
    /// No durable store is reachable.
    Unavailable,
    /// Write rejected because it would exceed the store quota.
    QuotaExceeded {
        key: String,
        requested_bytes: usize,
        quota_bytes: usize,
    },
    Db(DbError),
    /// Failure reported by a host-provided backend.
    Host(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage backend is unavailable"),
            Self::QuotaExceeded {
                key,
                requested_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {requested_bytes} bytes needed, quota {quota_bytes}"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::Host(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for BackendError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Backend for execution contexts without any durable store.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBackend;

impl StorageBackend for UnavailableBackend {
    fn is_available(&self) -> bool {
        false
    }

    fn read(&self, _key: &str) -> BackendResult<Option<String>> {
        Err(BackendError::Unavailable)
    }

    fn write(&self, _key: &str, _value: &str) -> BackendResult<()> {
        Err(BackendError::Unavailable)
    }

    fn remove(&self, _key: &str) -> BackendResult<()> {
        Err(BackendError::Unavailable)
    }
}
