//! Generic binding between one in-memory value and one storage key.
//!
//! # Responsibility
//! - Serve a usable value at all times (default until hydrated).
//! - Hydrate once from `DurableStore` via a job on the `EventLoop`.
//! - Mirror every post-hydration write to the store as a whole value.
//!
//! # Invariants
//! - `set` updates memory synchronously and unconditionally.
//! - No store write happens before hydration completes.
//! - If any `set` ran before hydration resolved, the loaded value is
//!   discarded and the in-memory value is persisted when it differs.
//! - No `RefCell` borrow is held while listeners or updaters run.
//! - The last value a listener receives always equals `get()`.

use crate::state::EventLoop;
use crate::storage::{DurableStore, KeyClaim, StoreError};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Handle returned by `PersistentState::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// Persistent state container for one storage key.
///
/// Cloning yields another handle to the same container.
pub struct PersistentState<T> {
    inner: Rc<Inner<T>>,
}

struct Inner<T> {
    claim: KeyClaim,
    default: T,
    value: RefCell<T>,
    /// Bumped by every `set`; zero means memory still holds the default.
    generation: Cell<u64>,
    hydrated: Cell<bool>,
    listeners: RefCell<Vec<(ListenerId, Listener<T>)>>,
    next_listener_id: Cell<u64>,
}

impl<T> PersistentState<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    /// Creates a container serving `default` and schedules its hydration.
    ///
    /// # Errors
    /// - `StoreError::EmptyKey` for a blank key.
    /// - `StoreError::KeyAlreadyClaimed` when another live container owns `key`.
    pub fn new(
        event_loop: &EventLoop,
        store: &Rc<DurableStore>,
        key: &str,
        default: T,
    ) -> Result<Self, StoreError> {
        let claim = store.claim_key(key)?;
        let inner = Rc::new(Inner {
            claim,
            value: RefCell::new(default.clone()),
            default,
            generation: Cell::new(0),
            hydrated: Cell::new(false),
            listeners: RefCell::default(),
            next_listener_id: Cell::new(0),
        });

        let pending = Rc::downgrade(&inner);
        event_loop.spawn(move || {
            if let Some(inner) = pending.upgrade() {
                inner.hydrate();
            }
        });

        Ok(Self { inner })
    }

    pub fn key(&self) -> &str {
        self.inner.claim.key()
    }

    /// Returns a snapshot of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Whether the container has reconciled with the durable store.
    pub fn is_hydrated(&self) -> bool {
        self.inner.hydrated.get()
    }

    /// Number of `set` calls since construction.
    pub fn generation(&self) -> u64 {
        self.inner.generation.get()
    }

    /// The value served before hydration and restored by `reset_to_default`.
    pub fn default_value(&self) -> &T {
        &self.inner.default
    }

    /// Replaces the value; persists it when hydrated.
    pub fn set(&self, value: T) {
        self.inner.commit(value);
    }

    /// Replaces the value with `updater(current)`.
    ///
    /// `updater` receives a snapshot, so it may read or write this container.
    pub fn update(&self, updater: impl FnOnce(&T) -> T) {
        let current = self.get();
        let next = updater(&current);
        self.set(next);
    }

    /// Sets the construction-time default as a regular write.
    pub fn reset_to_default(&self) {
        self.set(self.inner.default.clone());
    }

    /// Registers `listener` to receive the value after every change.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener_id.get());
        self.inner.next_listener_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }
}

impl<T> Inner<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    fn hydrate(&self) {
        if self.hydrated.get() {
            return;
        }

        let key = self.claim.key();
        let store = self.claim.store();
        if !store.is_available() {
            warn!(
                "event=state_hydrate module=state status=skipped key={} reason=store_unavailable",
                key
            );
            return;
        }

        let loaded = store.load(key, self.default.clone());
        let edits = self.generation.get();
        if edits == 0 {
            *self.value.borrow_mut() = loaded;
            self.hydrated.set(true);
            info!("event=state_hydrate module=state status=ok key={key} pending_edits=0");
            self.notify();
            return;
        }

        self.hydrated.set(true);
        let diverged = *self.value.borrow() != loaded;
        if diverged {
            store.save(key, &*self.value.borrow());
        }
        info!(
            "event=state_hydrate module=state status=ok key={} pending_edits={} kept_memory=true persisted={}",
            key, edits, diverged
        );
    }

    fn commit(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.generation.set(self.generation.get() + 1);

        if self.hydrated.get() {
            self.claim.store().save(self.claim.key(), &*self.value.borrow());
        }

        self.notify();
    }

    fn notify(&self) {
        let listeners: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        if listeners.is_empty() {
            return;
        }

        let generation = self.generation.get();
        let snapshot = self.value.borrow().clone();
        for listener in listeners {
            // A nested commit already delivered its newer value to everyone.
            if self.generation.get() != generation {
                return;
            }
            listener(&snapshot);
        }
    }
}

impl<T> Clone for PersistentState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Debug for PersistentState<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentState")
            .field("key", &self.inner.claim.key())
            .field("hydrated", &self.inner.hydrated.get())
            .field("generation", &self.inner.generation.get())
            .finish_non_exhaustive()
    }
}
