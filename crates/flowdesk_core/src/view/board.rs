//! Kanban board grouping.

use crate::model::task::{BoardColumn, Task};

/// Tasks of one board column in collection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    pub column: BoardColumn,
    pub tasks: Vec<&'a Task>,
}

/// Groups `tasks` into every board column, in column display order.
///
/// Tasks with an unknown group are left out; see `ungrouped_tasks`.
pub fn board_columns(tasks: &[Task]) -> Vec<ColumnView<'_>> {
    BoardColumn::ALL
        .into_iter()
        .map(|column| ColumnView {
            column,
            tasks: tasks
                .iter()
                .filter(|task| task.group_id == column.id())
                .collect(),
        })
        .collect()
}

/// Tasks whose group id does not name a board column.
pub fn ungrouped_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.column().is_none()).collect()
}
