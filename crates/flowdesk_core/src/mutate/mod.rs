//! Pure collection mutators.
//!
//! # Responsibility
//! - Compute the next collection value for one domain operation.
//! - Stay unaware of persistence; callers commit results to a container.
//!
//! # Invariants
//! - Inputs are never mutated; every mutator returns a fresh `Vec`.
//! - Newest-first ordering: inserted records are prepended.
//! - Operations on absent ids are no-ops, never errors.

mod reassign;

use crate::model::todo::TodoEntry;
use crate::model::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use reassign::move_to_group;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// A record with this id already exists in the collection.
    DuplicateId(String),
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "record id already exists: {id}"),
        }
    }
}

impl Error for MutationError {}

/// Prepends `record`.
///
/// # Errors
/// - `DuplicateId` when a record with the same id is already present.
pub fn insert<T: Record + Clone>(collection: &[T], record: T) -> Result<Vec<T>, MutationError> {
    if collection.iter().any(|existing| existing.id() == record.id()) {
        return Err(MutationError::DuplicateId(record.id().to_string()));
    }

    let mut next = Vec::with_capacity(collection.len() + 1);
    next.push(record);
    next.extend_from_slice(collection);
    Ok(next)
}

/// Drops every record with `id`. Idempotent.
pub fn remove_by_id<T: Record + Clone>(collection: &[T], id: &str) -> Vec<T> {
    collection
        .iter()
        .filter(|record| record.id() != id)
        .cloned()
        .collect()
}

/// Replaces the record with `id` by `edit(record)`, keeping its position.
pub fn update_by_id<T: Record + Clone>(
    collection: &[T],
    id: &str,
    edit: impl Fn(&T) -> T,
) -> Vec<T> {
    collection
        .iter()
        .map(|record| {
            if record.id() == id {
                edit(record)
            } else {
                record.clone()
            }
        })
        .collect()
}

/// Flips `completed` on the todo with `id`.
pub fn toggle_completed(collection: &[TodoEntry], id: &str) -> Vec<TodoEntry> {
    update_by_id(collection, id, |todo| TodoEntry {
        completed: !todo.completed,
        ..todo.clone()
    })
}

/// Drops all completed todos, keeping the order of open ones.
pub fn clear_completed(collection: &[TodoEntry]) -> Vec<TodoEntry> {
    collection
        .iter()
        .filter(|todo| !todo.completed)
        .cloned()
        .collect()
}
