//! Typed domain records for board/todo/calendar collections.
//!
//! # Responsibility
//! - Define the canonical record shapes stored in persistent collections.
//! - Provide shared identity and grouping contracts used by mutators.
//!
//! # Invariants
//! - Every record carries a non-blank opaque `id`, unique within its collection.
//! - Wire format is camelCase JSON with absent optionals omitted.

pub mod event;
pub mod id;
pub mod task;
pub mod todo;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identity contract shared by every collection record.
pub trait Record {
    /// Opaque identifier, unique within the owning collection.
    fn id(&self) -> &str;

    /// Checks structural invariants of one record.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Records that belong to exactly one named group (e.g. a board column).
pub trait Grouped: Record {
    fn group_id(&self) -> &str;

    /// Returns a copy of this record assigned to `group_id`.
    fn with_group(&self, group_id: &str) -> Self;
}

/// Structural record validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankId,
    BlankTitle,
    /// Event time is not a 24h `HH:mm` value.
    InvalidTime(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "record id must not be blank"),
            Self::BlankTitle => write!(f, "record title must not be blank"),
            Self::InvalidTime(value) => {
                write!(f, "event time `{value}` must use 24h HH:mm format")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn validate_identity(id: &str, title: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::BlankId);
    }
    if title.trim().is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    Ok(())
}
