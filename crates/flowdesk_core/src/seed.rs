//! Built-in seed data served before hydration and restored on reset.

use crate::model::event::CalendarEvent;
use crate::model::task::{BoardColumn, Priority, Task};
use crate::model::todo::TodoEntry;
use chrono::{Local, NaiveDate};

/// Returns today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Default board: one card in every column except `done`.
pub fn default_tasks(today: NaiveDate) -> Vec<Task> {
    let card = |id: &str,
                title: &str,
                description: &str,
                column: BoardColumn,
                priority: Priority,
                tag: &str| {
        let mut task = Task::with_id(id, title, column.id(), priority);
        task.description = Some(description.to_string());
        task.tags = Some(vec![tag.to_string()]);
        task
    };

    let mut tasks = vec![
        card(
            "task-1",
            "Wireframe dashboard widgets",
            "Sketch quick variations for overview cards",
            BoardColumn::Progress,
            Priority::Medium,
            "Design",
        ),
        card(
            "task-2",
            "Integrate calendar view",
            "Sync events list to grid component",
            BoardColumn::Todo,
            Priority::High,
            "Product",
        ),
        card(
            "task-3",
            "QA checklist",
            "Define manual smoke test for launch",
            BoardColumn::Backlog,
            Priority::Low,
            "Ops",
        ),
        card(
            "task-4",
            "Prepare launch comms",
            "Outline email + social copy drafts",
            BoardColumn::Review,
            Priority::Medium,
            "Marketing",
        ),
    ];
    for task in tasks.iter_mut().filter(|task| task.id != "task-3") {
        task.due_date = Some(today);
    }
    tasks
}

pub fn default_todos(today: NaiveDate) -> Vec<TodoEntry> {
    let mut inbox = TodoEntry::with_id("todo-1", "Inbox zero");
    inbox.notes = Some("Schedule 30 minute block".to_string());

    let mut sprint = TodoEntry::with_id("todo-2", "Plan next sprint");
    sprint.completed = true;
    sprint.due_date = Some(today);

    vec![inbox, sprint]
}

pub fn default_events(today: NaiveDate) -> Vec<CalendarEvent> {
    let mut standup = CalendarEvent::with_id("event-1", "Planning standup", today);
    standup.time = Some("09:30".to_string());
    standup.description = Some("Quick sync with product + design".to_string());

    let mut interviews = CalendarEvent::with_id("event-2", "Research interviews", today);
    interviews.time = Some("14:00".to_string());
    interviews.description = Some("Round two of discovery calls".to_string());

    vec![standup, interviews]
}

#[cfg(test)]
mod tests {
    use super::{default_events, default_tasks, default_todos};
    use crate::model::Record;
    use chrono::NaiveDate;

    #[test]
    fn seed_records_are_valid() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date");
        assert!(default_tasks(day).iter().all(|task| task.validate().is_ok()));
        assert!(default_todos(day).iter().all(|todo| todo.validate().is_ok()));
        assert!(default_events(day).iter().all(|event| event.validate().is_ok()));
    }

    #[test]
    fn seed_tasks_are_dated_except_backlog() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date");
        let undated: Vec<String> = default_tasks(day)
            .into_iter()
            .filter(|task| task.due_date.is_none())
            .map(|task| task.id)
            .collect();
        assert_eq!(undated, vec!["task-3".to_string()]);
    }
}
