//! Error type shared by storage, parsing and command handlers.
//!
//! The CLI swallows almost all of these at the command boundary, but the
//! handlers themselves report typed outcomes so callers (and tests) can tell
//! a missing task apart from bad input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JettError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid task id '{0}'")]
    InvalidId(String),

    #[error("task {0} not found")]
    TaskNotFound(u64),

    #[error("missing arguments for '{0}'")]
    MissingArguments(&'static str),
}

pub type Result<T> = std::result::Result<T, JettError>;
