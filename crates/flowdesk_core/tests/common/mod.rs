//! Shared test backends.

#![allow(dead_code)]

use flowdesk_core::storage::BackendResult;
use flowdesk_core::{BackendError, StorageBackend};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Default)]
struct Script {
    entries: BTreeMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    write_attempts: Vec<(String, String)>,
}

/// Backend with switchable failures that records every write attempt.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    script: Rc<RefCell<Script>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.script
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.script.borrow().entries.get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.script.borrow_mut().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.script.borrow_mut().fail_writes = fail;
    }

    /// Every attempted write, including failed ones.
    pub fn write_attempts(&self, key: &str) -> Vec<String> {
        self.script
            .borrow()
            .write_attempts
            .iter()
            .filter(|(written_key, _)| written_key == key)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl StorageBackend for ScriptedBackend {
    fn read(&self, key: &str) -> BackendResult<Option<String>> {
        let script = self.script.borrow();
        if script.fail_reads {
            return Err(BackendError::Host("simulated read failure".to_string()));
        }
        Ok(script.entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> BackendResult<()> {
        let mut script = self.script.borrow_mut();
        script
            .write_attempts
            .push((key.to_string(), value.to_string()));
        if script.fail_writes {
            return Err(BackendError::QuotaExceeded {
                key: key.to_string(),
                requested_bytes: value.len(),
                quota_bytes: 0,
            });
        }
        script.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        self.script.borrow_mut().entries.remove(key);
        Ok(())
    }
}
