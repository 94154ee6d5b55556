//! Backup document export/import for a whole workspace.
//!
//! # Responsibility
//! - Serialize all three collections plus an export timestamp.
//! - Parse and validate imported documents before touching any collection.
//!
//! # Invariants
//! - Import is all-or-nothing: a parse or validation failure leaves every
//!   collection unchanged.
//! - Keys that are absent or `null` in the document are left untouched.

use crate::model::event::CalendarEvent;
use crate::model::task::Task;
use crate::model::todo::TodoEntry;
use crate::model::{Record, ValidationError};
use crate::service::Workspace;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Suggested file name for exported documents.
pub const BACKUP_FILE_NAME: &str = "flow-suite-backup.json";

/// Errors surfaced to the user by export/import.
#[derive(Debug)]
pub enum BackupError {
    /// Document is not JSON or does not match the record shapes.
    Parse(serde_json::Error),
    /// A record decoded but violates a record invariant.
    InvalidRecord {
        collection: &'static str,
        index: usize,
        reason: ValidationError,
    },
    /// Two records in one collection share an id.
    DuplicateId {
        collection: &'static str,
        id: String,
    },
    Encode(serde_json::Error),
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "unable to import file, please check the format: {err}"),
            Self::InvalidRecord {
                collection,
                index,
                reason,
            } => write!(f, "invalid record {collection}[{index}]: {reason}"),
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate id `{id}` in {collection}")
            }
            Self::Encode(err) => write!(f, "unable to encode backup: {err}"),
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) | Self::Encode(err) => Some(err),
            Self::InvalidRecord { reason, .. } => Some(reason),
            Self::DuplicateId { .. } => None,
        }
    }
}

/// On-disk backup shape: `{ tasks, todos, events, exportedAt }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<TodoEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<CalendarEvent>>,
    /// RFC 3339 UTC timestamp with millisecond precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

impl BackupDocument {
    /// Parses and validates a document.
    ///
    /// # Errors
    /// - `Parse` for invalid JSON or mismatched record shapes.
    /// - `InvalidRecord` / `DuplicateId` for structurally invalid records.
    pub fn parse(json: &str) -> Result<Self, BackupError> {
        let document: Self = serde_json::from_str(json).map_err(BackupError::Parse)?;
        document.validate()?;
        Ok(document)
    }

    /// Pretty-prints the document with two-space indentation.
    pub fn to_json(&self) -> Result<String, BackupError> {
        serde_json::to_string_pretty(self).map_err(BackupError::Encode)
    }

    pub fn validate(&self) -> Result<(), BackupError> {
        if let Some(tasks) = &self.tasks {
            validate_collection("tasks", tasks)?;
        }
        if let Some(todos) = &self.todos {
            validate_collection("todos", todos)?;
        }
        if let Some(events) = &self.events {
            validate_collection("events", events)?;
        }
        Ok(())
    }
}

/// Collections replaced by one import, with their new lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub tasks: Option<usize>,
    pub todos: Option<usize>,
    pub events: Option<usize>,
}

impl Workspace {
    /// Snapshots all collections into a backup document.
    pub fn export_document(&self, exported_at: DateTime<Utc>) -> BackupDocument {
        BackupDocument {
            tasks: Some(self.tasks().get()),
            todos: Some(self.todos().get()),
            events: Some(self.events().get()),
            exported_at: Some(exported_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Exports all collections as pretty JSON.
    pub fn export_json(&self, exported_at: DateTime<Utc>) -> Result<String, BackupError> {
        self.export_document(exported_at).to_json()
    }

    /// Replaces every collection present in `json`.
    ///
    /// Nothing is written unless the whole document parses and validates.
    pub fn import_json(&self, json: &str) -> Result<ImportSummary, BackupError> {
        let document = BackupDocument::parse(json).map_err(|err| {
            warn!(
                "event=workspace_import module=service status=error bytes={} error={}",
                json.len(),
                err
            );
            err
        })?;
        Ok(self.apply_document(document))
    }

    /// Replaces every collection present in an already validated document.
    pub fn apply_document(&self, document: BackupDocument) -> ImportSummary {
        let mut summary = ImportSummary::default();
        if let Some(tasks) = document.tasks {
            summary.tasks = Some(tasks.len());
            self.tasks().set(tasks);
        }
        if let Some(todos) = document.todos {
            summary.todos = Some(todos.len());
            self.todos().set(todos);
        }
        if let Some(events) = document.events {
            summary.events = Some(events.len());
            self.events().set(events);
        }

        info!(
            "event=workspace_import module=service status=ok tasks={:?} todos={:?} events={:?}",
            summary.tasks, summary.todos, summary.events
        );
        summary
    }
}

fn validate_collection<T: Record>(collection: &'static str, records: &[T]) -> Result<(), BackupError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        record.validate().map_err(|reason| BackupError::InvalidRecord {
            collection,
            index,
            reason,
        })?;
        if !seen.insert(record.id()) {
            return Err(BackupError::DuplicateId {
                collection,
                id: record.id().to_string(),
            });
        }
    }
    Ok(())
}
