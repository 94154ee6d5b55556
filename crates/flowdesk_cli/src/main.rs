//! Command-line front end for a Flowdesk workspace.
//!
//! # Responsibility
//! - Open a SQLite-backed workspace, hydrate it, and apply one command.
//! - Keep output plain text so it can be piped or diffed.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use flowdesk_core::service::BACKUP_FILE_NAME;
use flowdesk_core::view::{board_columns, events_on, filter_todos, ungrouped_tasks, TodoFilter};
use flowdesk_core::{
    default_log_level, init_logging, seed, BoardColumn, CreateTaskRequest, CreateTodoRequest,
    DurableStore, EventLoop, Priority, ScheduleEventRequest, SqliteBackend, Workspace,
};
use log::info;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Parser)]
#[command(name = "flowdesk", version, about = "Local kanban, todo and calendar workspace")]
struct Cli {
    /// SQLite file holding the workspace.
    #[arg(long, env = "FLOWDESK_DB", default_value = "flowdesk.db")]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "FLOWDESK_LOG_DIR")]
    log_dir: Option<String>,

    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,

    /// Run without durable storage; changes are lost on exit.
    #[arg(long)]
    no_persist: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core health and version.
    Ping,
    /// Print dashboard counters.
    Summary,
    /// Print the kanban board.
    Board,
    /// Write a backup document.
    Export {
        #[arg(long, default_value = BACKUP_FILE_NAME)]
        output: PathBuf,
    },
    /// Replace collections from a backup document.
    Import { file: PathBuf },
    /// Clear storage and restore seed data.
    Reset,
    #[command(subcommand)]
    Task(TaskCommand),
    #[command(subcommand)]
    Todo(TodoCommand),
    #[command(subcommand)]
    Event(EventCommand),
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    Add(AddTaskArgs),
    Move {
        id: String,
        #[arg(value_enum)]
        column: ColumnArg,
    },
    Remove { id: String },
}

#[derive(Debug, Args)]
struct AddTaskArgs {
    title: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, value_enum, default_value_t = ColumnArg::Todo)]
    column: ColumnArg,
    #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
    priority: PriorityArg,
    #[arg(long)]
    due: Option<NaiveDate>,
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum TodoCommand {
    List {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    Add {
        title: String,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    Toggle { id: String },
    Remove { id: String },
    /// Drop completed todos.
    Clear,
}

#[derive(Debug, Subcommand)]
enum EventCommand {
    Add {
        title: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// 24h HH:mm.
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Remove { id: String },
    /// List events of one day (default: today).
    On { date: Option<NaiveDate> },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColumnArg {
    Backlog,
    Todo,
    Progress,
    Review,
    Done,
}

impl From<ColumnArg> for BoardColumn {
    fn from(value: ColumnArg) -> Self {
        match value {
            ColumnArg::Backlog => Self::Backlog,
            ColumnArg::Todo => Self::Todo,
            ColumnArg::Progress => Self::Progress,
            ColumnArg::Review => Self::Review,
            ColumnArg::Done => Self::Done,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Today,
    Upcoming,
}

impl From<FilterArg> for TodoFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => Self::All,
            FilterArg::Today => Self::Today,
            FilterArg::Upcoming => Self::Upcoming,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir).context("failed to initialize logging")?;
    }

    let store = if cli.no_persist {
        DurableStore::detached()
    } else {
        let backend = SqliteBackend::open(&cli.db)
            .with_context(|| format!("failed to open workspace `{}`", cli.db.display()))?;
        DurableStore::new(backend)
    };

    let today = seed::today();
    let event_loop = EventLoop::new();
    let workspace = Workspace::open(&event_loop, Rc::new(store), today)?;
    event_loop.run_until_idle();
    info!(
        "event=cli_ready module=cli status=ok hydrated={}",
        workspace.is_hydrated()
    );

    run(cli.command, &workspace, today)
}

fn run(command: Command, workspace: &Workspace, today: NaiveDate) -> Result<()> {
    match command {
        Command::Ping => {
            println!("flowdesk_core ping={}", flowdesk_core::ping());
            println!("flowdesk_core version={}", flowdesk_core::core_version());
        }
        Command::Summary => {
            let summary = workspace.summary(today);
            println!("open tasks: {}", summary.open_tasks);
            println!("in progress: {}", summary.in_progress_tasks);
            println!("todos due today: {}", summary.due_today.len());
            match summary.next_event {
                Some(event) => println!(
                    "next event: {} on {}{}",
                    event.title,
                    event.date,
                    event.time.map(|time| format!(" at {time}")).unwrap_or_default()
                ),
                None => println!("next event: none"),
            }
        }
        Command::Board => {
            let tasks = workspace.tasks().get();
            for column in board_columns(&tasks) {
                println!("## {} ({})", column.column.title(), column.tasks.len());
                for task in column.tasks {
                    println!("  {} [{:?}] {}", task.id, task.priority, task.title);
                }
            }
            let ungrouped = ungrouped_tasks(&tasks);
            if !ungrouped.is_empty() {
                println!("## Ungrouped ({})", ungrouped.len());
                for task in ungrouped {
                    println!("  {} [{}] {}", task.id, task.group_id, task.title);
                }
            }
        }
        Command::Export { output } => {
            let json = workspace.export_json(Utc::now())?;
            std::fs::write(&output, json)
                .with_context(|| format!("failed to write `{}`", output.display()))?;
            println!("exported to {}", output.display());
        }
        Command::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read `{}`", file.display()))?;
            let summary = workspace.import_json(&json)?;
            println!(
                "imported tasks={:?} todos={:?} events={:?}",
                summary.tasks, summary.todos, summary.events
            );
        }
        Command::Reset => {
            workspace.reset_to_defaults();
            println!("workspace reset to defaults");
        }
        Command::Task(command) => run_task(command, workspace)?,
        Command::Todo(command) => run_todo(command, workspace, today)?,
        Command::Event(command) => run_event(command, workspace, today)?,
    }
    Ok(())
}

fn run_task(command: TaskCommand, workspace: &Workspace) -> Result<()> {
    match command {
        TaskCommand::Add(args) => {
            let task = workspace.add_task(CreateTaskRequest {
                title: args.title,
                description: args.description,
                column: args.column.into(),
                priority: args.priority.into(),
                due_date: args.due,
                tags: args.tags,
            })?;
            println!("{}", task.id);
        }
        TaskCommand::Move { id, column } => ensure_found(workspace.move_task(&id, column.into()), &id)?,
        TaskCommand::Remove { id } => ensure_found(workspace.remove_task(&id), &id)?,
    }
    Ok(())
}

fn run_todo(command: TodoCommand, workspace: &Workspace, today: NaiveDate) -> Result<()> {
    match command {
        TodoCommand::List { filter } => {
            let todos = workspace.todos().get();
            for todo in filter_todos(&todos, filter.into(), today) {
                let mark = if todo.completed { "x" } else { " " };
                let due = todo.due_date.map(|due| format!(" (due {due})")).unwrap_or_default();
                println!("[{mark}] {} {}{}", todo.id, todo.title, due);
            }
        }
        TodoCommand::Add { title, due, notes } => {
            let todo = workspace.add_todo(CreateTodoRequest {
                title,
                due_date: due,
                notes,
            })?;
            println!("{}", todo.id);
        }
        TodoCommand::Toggle { id } => ensure_found(workspace.toggle_todo(&id), &id)?,
        TodoCommand::Remove { id } => ensure_found(workspace.remove_todo(&id), &id)?,
        TodoCommand::Clear => {
            println!("removed {}", workspace.clear_completed_todos());
        }
    }
    Ok(())
}

fn run_event(command: EventCommand, workspace: &Workspace, today: NaiveDate) -> Result<()> {
    match command {
        EventCommand::Add {
            title,
            date,
            time,
            description,
        } => {
            let event = workspace.schedule_event(ScheduleEventRequest {
                title,
                date: date.unwrap_or(today),
                time,
                description,
            })?;
            println!("{}", event.id);
        }
        EventCommand::Remove { id } => ensure_found(workspace.remove_event(&id), &id)?,
        EventCommand::On { date } => {
            let events = workspace.events().get();
            for event in events_on(&events, date.unwrap_or(today)) {
                let time = event.time.as_deref().unwrap_or("all day");
                println!("{time:>7} {} {}", event.id, event.title);
            }
        }
    }
    Ok(())
}

fn ensure_found(found: bool, id: &str) -> Result<()> {
    if !found {
        bail!("no record with id `{id}`");
    }
    Ok(())
}
