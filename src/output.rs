//! Text rendering for the banner, task rows, summary and usage.
//!
//! Everything here returns a `String`; the command layer decides when to print.

use std::fmt::Write;

use chrono::NaiveDate;
use crossterm::style::Stylize;

use crate::colors::*;
use crate::db::Summary;
use crate::task::Task;

/// Three-line boxed banner shown above command output.
pub fn banner() -> String {
    let rule = "━".repeat(38);
    format!(
        "{}\n{}\n{}\n",
        format!("┏{rule}┓").with(PINK),
        "┃              Jett CLI                ┃".with(TITLE),
        format!("┗{rule}┛").with(PINK),
    )
}

/// One task as printed by `list`, followed by a blank line.
pub fn render_task(task: &Task, today: NaiveDate) -> String {
    let state = task.due_state(today);
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", format!("[{:2}]", task.id).with(PINK), task.title);
    let _ = writeln!(
        out,
        "  Due: {}  Priority: {}",
        task.due_date.format("%Y-%m-%d"),
        task.priority.to_string().with(priority_color(task.priority)),
    );
    let _ = writeln!(out, "  Status: {}", state.to_string().with(due_state_color(state)));
    out.push('\n');
    out
}

pub fn render_no_matches() -> String {
    format!("{}\n", "No matching tasks".with(MUTED))
}

pub fn render_added(title: &str) -> String {
    format!("{} {title}\n", "Added:".with(TEXT))
}

pub fn render_summary(s: &Summary) -> String {
    use crate::fields::DueState;

    let mut out = String::new();
    let _ = writeln!(out, "Total: {}", s.total);
    let _ = writeln!(out, "{} {}", "Overdue:".with(due_state_color(DueState::Overdue)), s.overdue);
    let _ = writeln!(out, "{} {}", "Due today:".with(due_state_color(DueState::DueToday)), s.due_today);
    let _ = writeln!(out, "{} {}", "Done:".with(due_state_color(DueState::Done)), s.done);
    out
}

/// Usage text listing every verb.
pub fn usage() -> String {
    let mut out = banner();
    for line in [
        "jett add \"Title\" START DUE [PRIORITY]",
        "jett list [high|medium|low] [pending|done]",
        "jett edit <id> field=value...",
        "jett delete <id>",
        "jett done <id>",
        "jett summary",
        "jett completions <shell>",
    ] {
        out.push_str(line);
        out.push('\n');
    }
    out
}
