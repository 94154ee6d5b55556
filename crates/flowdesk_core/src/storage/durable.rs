//! Failure-containing adapter over a `StorageBackend`.
//!
//! # Responsibility
//! - Serialize/deserialize whole values to JSON strings per key.
//! - Absorb backend, quota and decode failures so callers always keep a
//!   usable value.
//! - Track which keys are owned by live state containers.
//!
//! # Invariants
//! - `load` always returns either the decoded stored value or `fallback`.
//! - `save`/`remove` never report failure to callers; failures are logged.
//! - Availability is decided once at construction; when unavailable every
//!   operation is a no-op.

use super::{StorageBackend, UnavailableBackend};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// Key ownership errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    EmptyKey,
    /// Another live container already owns this key.
    KeyAlreadyClaimed(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "storage key must not be blank"),
            Self::KeyAlreadyClaimed(key) => {
                write!(f, "storage key `{key}` is already owned by another container")
            }
        }
    }
}

impl Error for StoreError {}

/// Best-effort durable store shared by all state containers of one process.
pub struct DurableStore {
    backend: Box<dyn StorageBackend>,
    available: bool,
    claimed_keys: RefCell<BTreeSet<String>>,
}

impl DurableStore {
    /// Wraps `backend`, sampling its availability once.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        let available = backend.is_available();
        if !available {
            warn!("event=storage_init module=storage status=unavailable");
        }

        Self {
            backend: Box::new(backend),
            available,
            claimed_keys: RefCell::default(),
        }
    }

    /// Store for headless contexts: loads return fallbacks, writes are dropped.
    pub fn detached() -> Self {
        Self::new(UnavailableBackend)
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Reads and decodes the value under `key`, or returns `fallback`.
    ///
    /// An absent or empty stored string, a backend read failure and a decode
    /// failure (corrupt data, schema mismatch) all yield `fallback`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        if !self.available {
            return fallback;
        }

        let raw = match self.backend.read(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                debug!("event=storage_load module=storage status=absent key={key}");
                return fallback;
            }
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=fallback key={} error_code=backend_read_failed error={}",
                    key, err
                );
                return fallback;
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!(
                    "event=storage_load module=storage status=ok key={} bytes={}",
                    key,
                    raw.len()
                );
                value
            }
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=fallback key={} error_code=decode_failed bytes={} error={}",
                    key,
                    raw.len(),
                    err
                );
                fallback
            }
        }
    }

    /// Encodes and writes `value` under `key`. Failures are logged and dropped.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if !self.available {
            return;
        }

        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(
                    "event=storage_save module=storage status=error key={} error_code=encode_failed error={}",
                    key, err
                );
                return;
            }
        };

        match self.backend.write(key, &encoded) {
            Ok(()) => debug!(
                "event=storage_save module=storage status=ok key={} bytes={}",
                key,
                encoded.len()
            ),
            Err(err) => warn!(
                "event=storage_save module=storage status=error key={} error_code=write_failed bytes={} error={}",
                key,
                encoded.len(),
                err
            ),
        }
    }

    /// Deletes the value under `key`, if any.
    pub fn remove(&self, key: &str) {
        if !self.available {
            return;
        }

        if let Err(err) = self.backend.remove(key) {
            warn!(
                "event=storage_remove module=storage status=error key={} error={}",
                key, err
            );
        }
    }

    /// Removes every key in `keys`.
    pub fn clear_keys<'a>(&self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.remove(key);
        }
    }

    /// Registers exclusive ownership of `key` until the returned claim drops.
    ///
    /// # Errors
    /// - `EmptyKey` when `key` is blank.
    /// - `KeyAlreadyClaimed` when a live claim for `key` exists.
    pub fn claim_key(self: &Rc<Self>, key: &str) -> Result<KeyClaim, StoreError> {
        if key.trim().is_empty() {
            return Err(StoreError::EmptyKey);
        }
        if !self.claimed_keys.borrow_mut().insert(key.to_string()) {
            return Err(StoreError::KeyAlreadyClaimed(key.to_string()));
        }

        Ok(KeyClaim {
            store: Rc::clone(self),
            key: key.to_string(),
        })
    }

    /// Whether a live container currently owns `key`.
    pub fn is_claimed(&self, key: &str) -> bool {
        self.claimed_keys.borrow().contains(key)
    }
}

impl Debug for DurableStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableStore")
            .field("available", &self.available)
            .field("claimed_keys", &self.claimed_keys.borrow())
            .finish_non_exhaustive()
    }
}

/// Exclusive ownership of one storage key; released on drop.
pub struct KeyClaim {
    store: Rc<DurableStore>,
    key: String,
}

impl KeyClaim {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &Rc<DurableStore> {
        &self.store
    }
}

impl Debug for KeyClaim {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyClaim").field("key", &self.key).finish()
    }
}

impl Drop for KeyClaim {
    fn drop(&mut self) {
        self.store.claimed_keys.borrow_mut().remove(&self.key);
    }
}
