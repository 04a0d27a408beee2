//! # Jett - personal task tracking CLI
//!
//! Keeps a flat list of tasks in `tasks.json` in the working directory and
//! prints them with colorized priority and schedule labels.
//!
//! ```bash
//! jett add "Pay rent" 2024-06-01 2024-06-05 high
//! jett list high pending
//! jett edit 1 title="Pay rent (June)" due=2024-06-06
//! jett done 1
//! jett delete 1
//! jett summary
//! ```
//!
//! Tasks are sorted by due date and labelled Overdue, Due today, On schedule
//! or Done. Bad input never aborts a command: unparseable dates are stored as
//! `0001-01-01`, unknown priorities fall back to Medium, and unknown ids are
//! ignored. Pass `-v` to see what was skipped.

use chrono::Local;
use clap::error::ErrorKind;
use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod colors;
pub mod db;
pub mod error;
pub mod fields;
pub mod logging;
pub mod output;
pub mod task;

use cli::Cli;
use cmd::*;
use db::*;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(_) => {
            print!("{}", output::usage());
            return;
        }
    };

    logging::init(cli.verbose);

    let Some(command) = cli.command else {
        print!("{}", output::usage());
        return;
    };

    let db_path = cli.db;
    let today = Local::now().date_naive();

    match command {
        Commands::Add { title, start, due, priority, .. } => {
            cmd_add(&mut Database::load(&db_path), &db_path, title, start, due, priority)
        }
        Commands::List { filters } => cmd_list(&Database::load(&db_path), filters, today),
        Commands::Edit { id, assignments } => {
            cmd_edit(&mut Database::load(&db_path), &db_path, id, assignments)
        }
        Commands::Delete { id, .. } => cmd_delete(&mut Database::load(&db_path), &db_path, id),
        Commands::Done { id, .. } => cmd_done(&mut Database::load(&db_path), &db_path, id),
        Commands::Summary => cmd_summary(&Database::load(&db_path), today),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
