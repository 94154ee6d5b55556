//! Core state engine for the Flowdesk workspace.
//! Persistent client-state containers, pure collection mutators and the
//! board/todo/calendar domain built on them.

pub mod db;
pub mod logging;
pub mod model;
pub mod mutate;
pub mod seed;
pub mod service;
pub mod state;
pub mod storage;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::CalendarEvent;
pub use model::id::{generate_id, RecordId};
pub use model::task::{BoardColumn, Priority, Task};
pub use model::todo::TodoEntry;
pub use model::{Grouped, Record, ValidationError};
pub use mutate::MutationError;
pub use service::{
    BackupDocument, BackupError, CreateTaskRequest, CreateTodoRequest, ImportSummary,
    ScheduleEventRequest, Workspace, WorkspaceError,
};
pub use state::{EventLoop, PersistentState};
pub use storage::{
    BackendError, DurableStore, MemoryBackend, SqliteBackend, StorageBackend, StoreError,
    UnavailableBackend,
};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
