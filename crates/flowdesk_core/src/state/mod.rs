//! Persistent client-state containers and their scheduling model.
//!
//! # Responsibility
//! - Run deferred work (hydration loads) on a single-threaded event loop.
//! - Bind one in-memory collection to one durable storage key.
//!
//! # Invariants
//! - Hydration happens at most once per container, never synchronously
//!   inside construction.
//! - A value written by the user before hydration resolves is never
//!   clobbered by the loaded value.

mod event_loop;
mod persistent;

pub use event_loop::EventLoop;
pub use persistent::{ListenerId, PersistentState};
