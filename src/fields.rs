//! Enumerations and field parsers for tasks.
//!
//! Priority and status are parsed from user input through small lookup tables
//! keyed by the lower-cased token; single-letter abbreviations are ordinary
//! table entries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{JettError, Result};

/// Advisory importance of a task.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Persisted completion status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    Done,
}

/// Schedule label derived from a task's status and due date. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    Overdue,
    DueToday,
    OnSchedule,
    Done,
}

const PRIORITY_NAMES: &[(&str, Priority)] = &[
    ("high", Priority::High),
    ("h", Priority::High),
    ("medium", Priority::Medium),
    ("m", Priority::Medium),
    ("low", Priority::Low),
    ("l", Priority::Low),
];

const STATUS_NAMES: &[(&str, Status)] = &[
    ("pending", Status::Pending),
    ("p", Status::Pending),
    ("done", Status::Done),
    ("d", Status::Done),
];

fn lookup<T: Copy>(table: &[(&str, T)], input: &str) -> Option<T> {
    let key = input.trim().to_lowercase();
    table.iter().find(|(name, _)| *name == key).map(|(_, v)| *v)
}

impl FromStr for Priority {
    type Err = JettError;

    fn from_str(s: &str) -> Result<Self> {
        lookup(PRIORITY_NAMES, s).ok_or_else(|| JettError::InvalidPriority(s.to_string()))
    }
}

impl FromStr for Status {
    type Err = JettError;

    fn from_str(s: &str) -> Result<Self> {
        lookup(STATUS_NAMES, s).ok_or_else(|| JettError::InvalidStatus(s.to_string()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Pending => "Pending",
            Status::Done => "Done",
        })
    }
}

impl fmt::Display for DueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DueState::Overdue => "Overdue",
            DueState::DueToday => "Due today",
            DueState::OnSchedule => "On schedule",
            DueState::Done => "Done",
        })
    }
}

/// Stored records may carry any string here, including `""`; unknown values
/// read as Medium so one bad record does not make the whole file unreadable.
pub fn deserialize_priority<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Priority, D::Error> {
    let raw = String::deserialize(d)?;
    Ok(raw.parse().unwrap_or_else(|e: JettError| {
        warn!(error = %e, "stored priority unreadable, using Medium");
        Priority::Medium
    }))
}

/// Unknown stored statuses read as Pending.
pub fn deserialize_status<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Status, D::Error> {
    let raw = String::deserialize(d)?;
    Ok(raw.parse().unwrap_or_else(|e: JettError| {
        warn!(error = %e, "stored status unreadable, using Pending");
        Status::Pending
    }))
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    // chrono tolerates signs, spaces and short fields; the stored format does not.
    let b = s.as_bytes();
    let well_formed = b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        });
    if !well_formed {
        return Err(JettError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| JettError::InvalidDate(s.to_string()))
}

/// Placeholder stored when a date could not be parsed: 0001-01-01.
pub fn zero_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parse a task id given on the command line.
pub fn parse_id(s: &str) -> Result<u64> {
    s.trim().parse::<u64>().map_err(|_| JettError::InvalidId(s.to_string()))
}
