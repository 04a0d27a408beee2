use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cmd::Commands;
use crate::db::DEFAULT_DB_FILE;

/// Personal task tracker backed by a JSON file.
/// Storage defaults to ./tasks.json or a path passed via --db.
#[derive(Parser, Debug)]
#[command(name = "jett", version, about = "Personal task tracking CLI")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
