//! Workspace service over the task, todo and event collections.
//!
//! # Invariants
//! - Each collection is bound to its own fixed storage key.
//! - New records are validated before they reach a collection.
//! - Operations on unknown ids change nothing and report `false`.

use crate::model::event::CalendarEvent;
use crate::model::task::{BoardColumn, Priority, Task};
use crate::model::todo::TodoEntry;
use crate::model::Record;
use crate::mutate::{clear_completed, insert, move_to_group, remove_by_id, toggle_completed};
use crate::seed::{default_events, default_tasks, default_todos};
use crate::service::WorkspaceError;
use crate::state::{EventLoop, PersistentState};
use crate::storage::DurableStore;
use crate::view::{summarize, DashboardSummary};
use chrono::NaiveDate;
use log::info;
use std::rc::Rc;

/// Storage key of the kanban board.
pub const TASKS_STORAGE_KEY: &str = "kanban_board_v1";
/// Storage key of the todo list.
pub const TODOS_STORAGE_KEY: &str = "todos_v1";
/// Storage key of the calendar.
pub const EVENTS_STORAGE_KEY: &str = "calendar_events_v1";

/// Request model for adding a board card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub column: BoardColumn,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

/// Request model for adding a todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTodoRequest {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Request model for scheduling a calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEventRequest {
    pub title: String,
    pub date: NaiveDate,
    /// 24h `HH:mm`.
    pub time: Option<String>,
    pub description: Option<String>,
}

/// The three persistent collections of one workspace.
pub struct Workspace {
    store: Rc<DurableStore>,
    tasks: PersistentState<Vec<Task>>,
    todos: PersistentState<Vec<TodoEntry>>,
    events: PersistentState<Vec<CalendarEvent>>,
}

impl Workspace {
    /// Binds the collections to `store`, seeded with data dated `seed_date`.
    ///
    /// Hydration is queued on `event_loop`; until it runs, seed data is served.
    ///
    /// # Errors
    /// - `WorkspaceError::Store` when another workspace on `store` is live.
    pub fn open(
        event_loop: &EventLoop,
        store: Rc<DurableStore>,
        seed_date: NaiveDate,
    ) -> Result<Self, WorkspaceError> {
        let tasks = PersistentState::new(
            event_loop,
            &store,
            TASKS_STORAGE_KEY,
            default_tasks(seed_date),
        )?;
        let todos = PersistentState::new(
            event_loop,
            &store,
            TODOS_STORAGE_KEY,
            default_todos(seed_date),
        )?;
        let events = PersistentState::new(
            event_loop,
            &store,
            EVENTS_STORAGE_KEY,
            default_events(seed_date),
        )?;

        Ok(Self {
            store,
            tasks,
            todos,
            events,
        })
    }

    pub fn store(&self) -> &Rc<DurableStore> {
        &self.store
    }

    pub fn tasks(&self) -> &PersistentState<Vec<Task>> {
        &self.tasks
    }

    pub fn todos(&self) -> &PersistentState<Vec<TodoEntry>> {
        &self.todos
    }

    pub fn events(&self) -> &PersistentState<Vec<CalendarEvent>> {
        &self.events
    }

    /// Whether all three collections have hydrated.
    pub fn is_hydrated(&self) -> bool {
        self.tasks.is_hydrated() && self.todos.is_hydrated() && self.events.is_hydrated()
    }

    /// Adds a card to the top of its column.
    pub fn add_task(&self, request: CreateTaskRequest) -> Result<Task, WorkspaceError> {
        let mut task = Task::new(request.title.trim(), request.column, request.priority);
        task.description = non_blank(request.description);
        task.due_date = request.due_date;
        let tags: Vec<String> = request
            .tags
            .into_iter()
            .filter_map(|tag| non_blank(Some(tag)))
            .collect();
        task.tags = (!tags.is_empty()).then_some(tags);
        task.validate()?;

        self.tasks.set(insert(&self.tasks.get(), task.clone())?);
        Ok(task)
    }

    /// Moves a card to the top of `column`. Returns `false` for unknown ids.
    pub fn move_task(&self, id: &str, column: BoardColumn) -> bool {
        let current = self.tasks.get();
        if !contains(&current, id) {
            return false;
        }
        self.tasks.set(move_to_group(&current, id, column.id()));
        true
    }

    pub fn remove_task(&self, id: &str) -> bool {
        let current = self.tasks.get();
        if !contains(&current, id) {
            return false;
        }
        self.tasks.set(remove_by_id(&current, id));
        true
    }

    pub fn add_todo(&self, request: CreateTodoRequest) -> Result<TodoEntry, WorkspaceError> {
        let mut todo = TodoEntry::new(request.title.trim());
        todo.due_date = request.due_date;
        todo.notes = non_blank(request.notes);
        todo.validate()?;

        self.todos.set(insert(&self.todos.get(), todo.clone())?);
        Ok(todo)
    }

    pub fn toggle_todo(&self, id: &str) -> bool {
        let current = self.todos.get();
        if !contains(&current, id) {
            return false;
        }
        self.todos.set(toggle_completed(&current, id));
        true
    }

    pub fn remove_todo(&self, id: &str) -> bool {
        let current = self.todos.get();
        if !contains(&current, id) {
            return false;
        }
        self.todos.set(remove_by_id(&current, id));
        true
    }

    /// Drops completed todos and returns how many were removed.
    pub fn clear_completed_todos(&self) -> usize {
        let current = self.todos.get();
        let next = clear_completed(&current);
        let removed = current.len() - next.len();
        if removed > 0 {
            self.todos.set(next);
        }
        removed
    }

    pub fn schedule_event(
        &self,
        request: ScheduleEventRequest,
    ) -> Result<CalendarEvent, WorkspaceError> {
        let mut event = CalendarEvent::new(request.title.trim(), request.date);
        event.time = non_blank(request.time);
        event.description = non_blank(request.description);
        event.validate()?;

        self.events.set(insert(&self.events.get(), event.clone())?);
        Ok(event)
    }

    pub fn remove_event(&self, id: &str) -> bool {
        let current = self.events.get();
        if !contains(&current, id) {
            return false;
        }
        self.events.set(remove_by_id(&current, id));
        true
    }

    /// Clears all durable keys and restores seed data in memory.
    pub fn reset_to_defaults(&self) {
        self.store
            .clear_keys([TASKS_STORAGE_KEY, TODOS_STORAGE_KEY, EVENTS_STORAGE_KEY]);
        self.tasks.reset_to_default();
        self.todos.reset_to_default();
        self.events.reset_to_default();
        info!("event=workspace_reset module=service status=ok");
    }

    /// Dashboard counters for `today`.
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        summarize(
            &self.tasks.get(),
            &self.todos.get(),
            &self.events.get(),
            today,
        )
    }
}

fn contains<T: Record>(collection: &[T], id: &str) -> bool {
    collection.iter().any(|record| record.id() == id)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
