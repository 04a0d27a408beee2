//! Task data structure and schedule derivation.
//!
//! Dates are calendar days in memory but are written as midnight-UTC
//! date-times (`2024-06-10T00:00:00Z`). Reading is lenient per field: an
//! unreadable date, priority or status falls back to a default instead of
//! rejecting the record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(with = "iso_datetime")]
    pub start_date: NaiveDate,
    #[serde(with = "iso_datetime")]
    pub due_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_priority")]
    pub priority: Priority,
    #[serde(deserialize_with = "deserialize_status")]
    pub status: Status,
}

impl Task {
    /// Derive the schedule label relative to `today`.
    pub fn due_state(&self, today: NaiveDate) -> DueState {
        if self.status == Status::Done {
            return DueState::Done;
        }
        match self.due_date.cmp(&today) {
            std::cmp::Ordering::Less => DueState::Overdue,
            std::cmp::Ordering::Equal => DueState::DueToday,
            std::cmp::Ordering::Greater => DueState::OnSchedule,
        }
    }
}

mod iso_datetime {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    use crate::fields::zero_date;

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("{}T00:00:00Z", date.format("%Y-%m-%d")))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        // Keep the calendar day as written, in its own offset.
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(dt.date_naive());
        }
        Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").unwrap_or_else(|_| {
            warn!(date = %raw, "stored date unreadable, using zero date");
            zero_date()
        }))
    }
}
