//! Kanban task record and board columns.
//!
//! # Invariants
//! - `group_id` should name a `BoardColumn`; unknown values are kept as-is
//!   and surface as ungrouped tasks.
//! - `group_id` is serialized as `status` to stay compatible with stored boards.

use crate::model::id::{generate_id, RecordId};
use crate::model::{validate_identity, Grouped, Record, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed, ordered set of board columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoardColumn {
    Backlog,
    /// New cards land here unless another column is chosen.
    #[default]
    Todo,
    Progress,
    Review,
    Done,
}

impl BoardColumn {
    /// All columns in display order.
    pub const ALL: [BoardColumn; 5] = [
        Self::Backlog,
        Self::Todo,
        Self::Progress,
        Self::Review,
        Self::Done,
    ];

    /// Stable group id stored in `Task::group_id`.
    pub fn id(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::Progress => "progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Todo => "To Do",
            Self::Progress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }

    /// Parses a stored group id. Matching is exact.
    pub fn from_id(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.id() == value)
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// One card on the kanban board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "status")]
    pub group_id: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Task {
    /// Creates a task with a generated id in `column`.
    pub fn new(title: impl Into<String>, column: BoardColumn, priority: Priority) -> Self {
        Self::with_id(generate_id(), title, column.id(), priority)
    }

    /// Creates a task with a caller-provided id, e.g. for seed data.
    pub fn with_id(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        group_id: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            group_id: group_id.into(),
            priority,
            due_date: None,
            tags: None,
        }
    }

    /// Returns the board column this task renders in, if the group is known.
    pub fn column(&self) -> Option<BoardColumn> {
        BoardColumn::from_id(&self.group_id)
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identity(&self.id, &self.title)
    }
}

impl Grouped for Task {
    fn group_id(&self) -> &str {
        &self.group_id
    }

    fn with_group(&self, group_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            ..self.clone()
        }
    }
}
