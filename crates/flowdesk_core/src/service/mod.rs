//! Workspace use-case services.
//!
//! # Responsibility
//! - Own the three persistent collections (tasks, todos, events).
//! - Expose domain operations that compute values via `mutate` and commit
//!   them through `PersistentState`.
//! - Provide export/import/reset collaborators.

pub mod backup;
pub mod workspace;

use crate::model::ValidationError;
use crate::mutate::MutationError;
use crate::storage::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use backup::{BackupDocument, BackupError, ImportSummary, BACKUP_FILE_NAME};
pub use workspace::{
    CreateTaskRequest, CreateTodoRequest, ScheduleEventRequest, Workspace, EVENTS_STORAGE_KEY,
    TASKS_STORAGE_KEY, TODOS_STORAGE_KEY,
};

/// Errors from workspace operations driven by user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    Store(StoreError),
    Validation(ValidationError),
    Mutation(MutationError),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Mutation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Mutation(err) => Some(err),
        }
    }
}

impl From<StoreError> for WorkspaceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ValidationError> for WorkspaceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<MutationError> for WorkspaceError {
    fn from(value: MutationError) -> Self {
        Self::Mutation(value)
    }
}
