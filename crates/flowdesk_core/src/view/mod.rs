//! Read-only projections over workspace collections.
//!
//! # Responsibility
//! - Derive board columns, filtered todo lists, day agendas and dashboard
//!   counters from collection snapshots.
//!
//! # Invariants
//! - Projections never reorder the underlying collections.
//! - Sorting is stable, so ties keep newest-first collection order.

mod agenda;
mod board;

pub use agenda::{events_on, filter_todos, summarize, DashboardSummary, TodoFilter};
pub use board::{board_columns, ungrouped_tasks, ColumnView};
