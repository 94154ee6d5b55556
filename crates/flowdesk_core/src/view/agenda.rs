//! Todo filters, day agenda and dashboard counters.

use crate::model::event::CalendarEvent;
use crate::model::task::{BoardColumn, Task};
use crate::model::todo::TodoEntry;
use chrono::NaiveDate;

/// Todo list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TodoFilter {
    #[default]
    All,
    /// Due exactly today.
    Today,
    /// Due strictly after today.
    Upcoming,
}

/// Returns todos matching `filter`, sorted by due date with undated first.
pub fn filter_todos(todos: &[TodoEntry], filter: TodoFilter, today: NaiveDate) -> Vec<&TodoEntry> {
    let mut matching: Vec<&TodoEntry> = todos
        .iter()
        .filter(|todo| match filter {
            TodoFilter::All => true,
            TodoFilter::Today => todo.due_date == Some(today),
            TodoFilter::Upcoming => todo.due_date.is_some_and(|due| due > today),
        })
        .collect();
    matching.sort_by_key(|todo| todo.due_date);
    matching
}

/// Events on `date`, sorted by time with untimed events first.
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    let mut day: Vec<&CalendarEvent> = events.iter().filter(|event| event.date == date).collect();
    day.sort_by(|left, right| left.time.cmp(&right.time));
    day
}

/// Overview counters for the landing dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Tasks not in the `done` column.
    pub open_tasks: usize,
    pub in_progress_tasks: usize,
    /// Open todos due today.
    pub due_today: Vec<TodoEntry>,
    /// Earliest event dated today or later; untimed events lead their day.
    pub next_event: Option<CalendarEvent>,
}

pub fn summarize(
    tasks: &[Task],
    todos: &[TodoEntry],
    events: &[CalendarEvent],
    today: NaiveDate,
) -> DashboardSummary {
    let open_tasks = tasks
        .iter()
        .filter(|task| task.group_id != BoardColumn::Done.id())
        .count();
    let in_progress_tasks = tasks
        .iter()
        .filter(|task| task.group_id == BoardColumn::Progress.id())
        .count();
    let due_today = todos
        .iter()
        .filter(|todo| todo.due_date == Some(today) && !todo.completed)
        .cloned()
        .collect();

    let mut upcoming: Vec<&CalendarEvent> = events.iter().filter(|event| event.date >= today).collect();
    upcoming.sort_by(|left, right| (left.date, &left.time).cmp(&(right.date, &right.time)));

    DashboardSummary {
        open_tasks,
        in_progress_tasks,
        due_today,
        next_event: upcoming.first().map(|event| (*event).clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::{events_on, filter_todos, summarize, TodoFilter};
    use crate::model::event::CalendarEvent;
    use crate::model::todo::TodoEntry;
    use crate::seed::{default_events, default_tasks, default_todos};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).expect("valid date")
    }

    fn todo(id: &str, due: Option<NaiveDate>) -> TodoEntry {
        let mut todo = TodoEntry::with_id(id, id);
        todo.due_date = due;
        todo
    }

    #[test]
    fn todo_filters_sort_undated_first() {
        let todos = vec![
            todo("later", Some(day(20))),
            todo("undated", None),
            todo("today", Some(day(10))),
            todo("past", Some(day(1))),
        ];

        let ids = |filter| -> Vec<String> {
            filter_todos(&todos, filter, day(10))
                .into_iter()
                .map(|todo| todo.id.clone())
                .collect()
        };

        assert_eq!(ids(TodoFilter::All), vec!["undated", "past", "today", "later"]);
        assert_eq!(ids(TodoFilter::Today), vec!["today"]);
        assert_eq!(ids(TodoFilter::Upcoming), vec!["later"]);
    }

    #[test]
    fn agenda_sorts_by_time_with_untimed_first() {
        let mut late = CalendarEvent::with_id("late", "Late", day(3));
        late.time = Some("17:00".to_string());
        let mut early = CalendarEvent::with_id("early", "Early", day(3));
        early.time = Some("08:15".to_string());
        let untimed = CalendarEvent::with_id("allday", "All day", day(3));
        let other_day = CalendarEvent::with_id("other", "Other", day(4));

        let events = vec![late, other_day, early, untimed];
        let ids: Vec<&str> = events_on(&events, day(3))
            .into_iter()
            .map(|event| event.id.as_str())
            .collect();
        assert_eq!(ids, vec!["allday", "early", "late"]);
    }

    #[test]
    fn summary_counts_seed_workspace() {
        let today = day(12);
        let summary = summarize(
            &default_tasks(today),
            &default_todos(today),
            &default_events(today),
            today,
        );

        assert_eq!(summary.open_tasks, 4);
        assert_eq!(summary.in_progress_tasks, 1);
        assert!(summary.due_today.is_empty());
        assert_eq!(
            summary.next_event.map(|event| event.id),
            Some("event-1".to_string())
        );
    }

    #[test]
    fn summary_skips_past_events() {
        let past = CalendarEvent::with_id("past", "Past", day(1));
        let summary = summarize(&[], &[], &[past], day(2));
        assert_eq!(summary.next_event, None);
    }
}
