//! Command implementations for the CLI interface.
//!
//! Each verb has a core function that works on an in-memory [`Database`] and
//! returns a typed outcome, and a `cmd_*` wrapper that prints, saves, and
//! swallows the outcome. Bad ids, bad dates and unknown ids never abort a
//! command; they are logged and the command degrades to a no-op or a default.

use std::path::Path;

use chrono::NaiveDate;
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::{debug, info, warn};

use crate::db::*;
use crate::error::{JettError, Result};
use crate::fields::*;
use crate::output::*;
use crate::task::Task;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Short title for the task.
        #[arg(allow_hyphen_values = true)]
        title: Option<String>,
        /// Start date: YYYY-MM-DD.
        start: Option<String>,
        /// Due date: YYYY-MM-DD.
        due: Option<String>,
        /// Priority: high | medium | low (or h, m, l). Defaults to medium.
        priority: Option<String>,
        /// Extra arguments are accepted and ignored.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        _rest: Vec<String>,
    },

    /// List tasks sorted by due date.
    List {
        /// Optional priority and/or status filters, e.g. `high pending`.
        #[arg(allow_hyphen_values = true)]
        filters: Vec<String>,
    },

    /// Update fields on a task with key=value pairs (title, due, priority, status).
    Edit {
        /// Task ID.
        id: Option<String>,
        /// Assignments such as `title="New title"` or `due=2024-01-01`.
        #[arg(allow_hyphen_values = true)]
        assignments: Vec<String>,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID.
        id: Option<String>,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        _rest: Vec<String>,
    },

    /// Mark a task done.
    Done {
        /// Task ID.
        id: Option<String>,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        _rest: Vec<String>,
    },

    /// Show counts of overdue, due-today and done tasks.
    Summary,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Filters accepted by `list`. The last token of each kind wins.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListFilter {
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl ListFilter {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut filter = ListFilter::default();
        for token in tokens {
            let token = token.as_ref();
            if let Ok(p) = token.parse::<Priority>() {
                filter.priority = Some(p);
            } else if let Ok(s) = token.parse::<Status>() {
                filter.status = Some(s);
            } else {
                debug!(token, "ignoring unknown list filter");
            }
        }
        filter
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.priority.map_or(true, |p| task.priority == p)
            && self.status.map_or(true, |s| task.status == s)
    }
}

fn date_or_zero(field: &str, raw: &str) -> NaiveDate {
    parse_date(raw).unwrap_or_else(|e| {
        warn!(field, error = %e, "using zero date");
        zero_date()
    })
}

fn persist(db: &Database, db_path: &Path) {
    if let Err(e) = db.save(db_path) {
        warn!(path = %db_path.display(), error = %e, "failed to save task file");
    }
}

/// Append a new pending task and return it.
pub fn add_task<'a>(
    db: &'a mut Database,
    title: &str,
    start: &str,
    due: &str,
    priority: Option<&str>,
) -> &'a Task {
    let priority = match priority {
        None => Priority::Medium,
        Some(raw) => raw.parse().unwrap_or_else(|e: JettError| {
            warn!(error = %e, "defaulting priority to Medium");
            Priority::Medium
        }),
    };
    let task = Task {
        id: db.next_id(),
        title: title.to_string(),
        start_date: date_or_zero("start", start),
        due_date: date_or_zero("due", due),
        priority,
        status: Status::Pending,
    };
    info!(id = task.id, "added task");
    db.tasks.push(task);
    &db.tasks[db.tasks.len() - 1]
}

/// Tasks matching `filter`, ascending by due date. Ties keep file order.
pub fn select_tasks<'a>(db: &'a Database, filter: &ListFilter) -> Vec<&'a Task> {
    let mut tasks: Vec<&Task> = db.tasks.iter().filter(|t| filter.matches(t)).collect();
    tasks.sort_by_key(|t| t.due_date);
    tasks
}

/// Apply `key=value` assignments to the task with `id`.
///
/// Malformed pairs, unknown keys and unparseable values leave the task as it was.
pub fn edit_task<S: AsRef<str>>(db: &mut Database, id: u64, assignments: &[S]) -> Result<()> {
    let task = db.get_mut(id).ok_or(JettError::TaskNotFound(id))?;
    for kv in assignments {
        let Some((key, value)) = kv.as_ref().split_once('=') else {
            debug!(pair = kv.as_ref(), "ignoring malformed assignment");
            continue;
        };
        let applied = match key {
            "title" => {
                task.title = value.to_string();
                Ok(())
            }
            "due" => parse_date(value).map(|d| task.due_date = d),
            "priority" => value.parse().map(|p| task.priority = p),
            "status" => value.parse().map(|s| task.status = s),
            other => {
                debug!(key = other, "ignoring unknown field");
                Ok(())
            }
        };
        if let Err(e) = applied {
            warn!(id, key, error = %e, "field left unchanged");
        }
    }
    Ok(())
}

/// Mark the task with `id` as done.
pub fn complete_task(db: &mut Database, id: u64) -> Result<()> {
    let task = db.get_mut(id).ok_or(JettError::TaskNotFound(id))?;
    task.status = Status::Done;
    Ok(())
}

/// Remove the task with `id`.
pub fn delete_task(db: &mut Database, id: u64) -> Result<Task> {
    db.remove_id(id).ok_or(JettError::TaskNotFound(id))
}

/// Add a new task to the database.
pub fn cmd_add(
    db: &mut Database,
    db_path: &Path,
    title: Option<String>,
    start: Option<String>,
    due: Option<String>,
    priority: Option<String>,
) {
    let (Some(title), Some(start), Some(due)) = (title, start, due) else {
        debug!(error = %JettError::MissingArguments("add"), "printing usage");
        println!("Usage: jett add \"Title\" START DUE [PRIORITY]");
        return;
    };
    let title = add_task(db, &title, &start, &due, priority.as_deref()).title.clone();
    persist(db, db_path);
    print!("{}", banner());
    print!("{}", render_added(&title));
}

/// List tasks with optional priority/status filtering.
pub fn cmd_list(db: &Database, filters: Vec<String>, today: NaiveDate) {
    print!("{}", banner());
    let filter = ListFilter::from_tokens(filters.as_slice());
    let tasks = select_tasks(db, &filter);
    if tasks.is_empty() {
        print!("{}", render_no_matches());
        return;
    }
    for t in tasks {
        print!("{}", render_task(t, today));
    }
}

/// Parse an id argument; an unparseable id turns the command into a no-op.
fn resolve_id(verb: &'static str, raw: &str) -> Option<u64> {
    match parse_id(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(error = %e, "{verb} skipped");
            None
        }
    }
}

fn missing_id(verb: &'static str, params: &str) {
    debug!(error = %JettError::MissingArguments(verb), "printing usage");
    println!("Usage: jett {verb} {params}");
}

/// Update an existing task's fields.
pub fn cmd_edit(db: &mut Database, db_path: &Path, id: Option<String>, assignments: Vec<String>) {
    let Some(raw) = id else {
        missing_id("edit", "<id> field=value...");
        return;
    };
    let Some(id) = resolve_id("edit", &raw) else { return };
    match edit_task(db, id, assignments.as_slice()) {
        Ok(()) => println!("Updated task {id}"),
        Err(e) => debug!(error = %e, "edit was a no-op"),
    }
    persist(db, db_path);
}

/// Delete a task by ID.
pub fn cmd_delete(db: &mut Database, db_path: &Path, id: Option<String>) {
    let Some(raw) = id else {
        missing_id("delete", "<id>");
        return;
    };
    let Some(id) = resolve_id("delete", &raw) else { return };
    match delete_task(db, id) {
        Ok(_) => println!("Deleted task {id}"),
        Err(e) => debug!(error = %e, "delete was a no-op"),
    }
    persist(db, db_path);
}

/// Mark a task as completed.
pub fn cmd_done(db: &mut Database, db_path: &Path, id: Option<String>) {
    let Some(raw) = id else {
        missing_id("done", "<id>");
        return;
    };
    let Some(id) = resolve_id("done", &raw) else { return };
    match complete_task(db, id) {
        Ok(()) => println!("Completed task {id}"),
        Err(e) => debug!(error = %e, "done was a no-op"),
    }
    persist(db, db_path);
}

/// Print totals relative to `today`.
pub fn cmd_summary(db: &Database, today: NaiveDate) {
    print!("{}", banner());
    print!("{}", render_summary(&db.summary(today)));
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
