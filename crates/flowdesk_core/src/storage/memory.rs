//! In-process key-value backend with an optional byte quota.

use super::{BackendError, BackendResult, StorageBackend};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Shared in-memory map modelled on per-origin browser storage.
///
/// Clones share the same entries, so a test can keep one handle for
/// inspection while a `DurableStore` owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend rejecting writes once keys + values exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Rc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns the raw stored string for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Stores `value` verbatim, bypassing quota checks.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(stored_key, _)| stored_key.as_str() != key)
            .map(|(stored_key, value)| stored_key.len() + value.len())
            .sum()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> BackendResult<()> {
        if let Some(quota_bytes) = self.quota_bytes {
            let requested_bytes = self.used_bytes_excluding(key) + key.len() + value.len();
            if requested_bytes > quota_bytes {
                return Err(BackendError::QuotaExceeded {
                    key: key.to_string(),
                    requested_bytes,
                    quota_bytes,
                });
            }
        }

        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
