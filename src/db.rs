//! Flat-file task store.
//!
//! The whole collection is read on every invocation and rewritten in full by
//! mutating commands. There is no locking; the last writer wins.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::fields::*;
use crate::task::Task;

/// Default file name, resolved against the working directory.
pub const DEFAULT_DB_FILE: &str = "tasks.json";

/// In-memory task collection, serialized as `{"tasks": [...]}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Counts printed by `summary`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub overdue: usize,
    pub due_today: usize,
    pub done: usize,
}

impl Database {
    /// Load the collection. A missing, empty or unreadable file yields an empty one.
    pub fn load(path: &Path) -> Self {
        let buf = match fs::read_to_string(path) {
            Ok(buf) => buf,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "task file not readable, starting empty");
                return Database::default();
            }
        };
        if buf.trim().is_empty() {
            return Database::default();
        }
        match serde_json::from_str::<Database>(&buf) {
            Ok(db) => {
                debug!(path = %path.display(), tasks = db.tasks.len(), "loaded task file");
                db
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "task file not parseable, starting empty");
                Database::default()
            }
        }
    }

    /// Save as indented JSON via temp file + rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        let written = File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(data.as_bytes())?;
                f.flush()
            })
            .and_then(|()| fs::rename(&tmp, path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %path.display(), tasks = self.tasks.len(), "saved task file");
        Ok(())
    }

    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        // Saturates rather than wrapping on a hand-edited u64::MAX id.
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0).saturating_add(1)
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove the task with `id`, keeping the order of the rest.
    pub fn remove_id(&mut self, id: u64) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    /// Tally the collection relative to `today`.
    pub fn summary(&self, today: NaiveDate) -> Summary {
        let mut s = Summary {
            total: self.tasks.len(),
            ..Summary::default()
        };
        for t in &self.tasks {
            match t.due_state(today) {
                DueState::Done => s.done += 1,
                DueState::Overdue => s.overdue += 1,
                DueState::DueToday => s.due_today += 1,
                DueState::OnSchedule => {}
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: u64, due: NaiveDate, status: Status) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            start_date: ymd(2024, 6, 1),
            due_date: due,
            priority: Priority::Low,
            status,
        }
    }

    #[test]
    fn next_id_starts_at_one_and_follows_max() {
        let mut db = Database::default();
        assert_eq!(db.next_id(), 1);
        for id in [1, 3, 5] {
            db.tasks.push(task(id, ymd(2024, 6, 1), Status::Pending));
        }
        assert_eq!(db.next_id(), 6);
    }

    #[test]
    fn save_then_load_is_lossless() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_DB_FILE);
        let mut db = Database::default();
        db.tasks.push(task(1, ymd(2024, 6, 9), Status::Pending));
        db.tasks.push(task(2, ymd(2024, 7, 1), Status::Done));
        db.tasks[1].priority = Priority::High;

        db.save(&path).unwrap();
        assert_eq!(Database::load(&path), db);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn saved_file_is_indented_tasks_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_DB_FILE);
        let mut db = Database::default();
        db.tasks.push(task(1, ymd(2024, 6, 9), Status::Pending));
        db.save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("{\n  \"tasks\": ["));
        assert!(raw.contains("\"due_date\": \"2024-06-09T00:00:00Z\""));
    }

    #[test]
    fn missing_empty_or_garbage_files_load_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_DB_FILE);
        assert_eq!(Database::load(&path), Database::default());

        fs::write(&path, "").unwrap();
        assert_eq!(Database::load(&path), Database::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Database::load(&path), Database::default());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join(DEFAULT_DB_FILE);
        assert!(Database::default().save(&path).is_err());
    }

    #[test]
    fn next_id_saturates_at_max() {
        let mut db = Database::default();
        db.tasks.push(task(u64::MAX, ymd(2024, 6, 1), Status::Pending));
        assert_eq!(db.next_id(), u64::MAX);
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        // A directory in the file's place makes the final rename fail.
        let path = dir.path().join(DEFAULT_DB_FILE);
        fs::create_dir(&path).unwrap();

        assert!(Database::default().save(&path).is_err());
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn record_with_blank_fields_does_not_drop_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_DB_FILE);
        fs::write(
            &path,
            r#"{"tasks": [
                {"id": 1, "title": "keep me", "start_date": "2024-06-01T00:00:00Z",
                 "due_date": "2024-06-09T00:00:00Z", "priority": "High", "status": "Pending"},
                {"id": 2, "title": "blank priority", "start_date": "2024-06-01T00:00:00Z",
                 "due_date": "2024-06-10T00:00:00Z", "priority": "", "status": ""}
            ]}"#,
        )
        .unwrap();

        let db = Database::load(&path);
        assert_eq!(db.tasks.len(), 2);
        assert_eq!(db.tasks[0].title, "keep me");
        assert_eq!(db.tasks[0].priority, Priority::High);
        assert_eq!(db.tasks[1].priority, Priority::Medium);
        assert_eq!(db.tasks[1].status, Status::Pending);
        assert_eq!(db.next_id(), 3);

        db.save(&path).unwrap();
        let reloaded = Database::load(&path);
        assert_eq!(reloaded, db);
    }

    #[test]
    fn remove_id_preserves_order() {
        let mut db = Database::default();
        for id in 1..=4 {
            db.tasks.push(task(id, ymd(2024, 6, 1), Status::Pending));
        }
        assert!(db.remove_id(9).is_none());
        assert_eq!(db.tasks.len(), 4);

        let removed = db.remove_id(2).unwrap();
        assert_eq!(removed.id, 2);
        let ids: Vec<u64> = db.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn summary_counts_pending_by_schedule() {
        let today = ymd(2024, 6, 10);
        let mut db = Database::default();
        db.tasks.push(task(1, ymd(2024, 6, 9), Status::Pending));
        db.tasks.push(task(2, ymd(2024, 6, 8), Status::Pending));
        db.tasks.push(task(3, ymd(2024, 6, 10), Status::Pending));
        db.tasks.push(task(4, ymd(2024, 6, 11), Status::Pending));
        db.tasks.push(task(5, ymd(2024, 6, 1), Status::Done));

        assert_eq!(
            db.summary(today),
            Summary {
                total: 5,
                overdue: 2,
                due_today: 1,
                done: 1,
            }
        );
    }
}
