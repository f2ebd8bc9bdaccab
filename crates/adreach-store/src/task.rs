//! Task storage.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use adreach_types::{Task, TaskId, TaskStatus};

use crate::error::{Result, StoreError};
use crate::traits::TaskStore;

/// SQLite-based task storage.
pub struct SqliteTaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTaskStore {
    /// Create a new task store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Deserialize a task from a database row.
    fn deserialize_task(row: &rusqlite::Row) -> rusqlite::Result<RawTask> {
        Ok(RawTask {
            id: row.get(0)?,
            owner: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            content_ref: row.get(4)?,
            status: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

/// Row image before typed decoding.
struct RawTask {
    id: TaskId,
    owner: String,
    title: String,
    description: String,
    content_ref: Option<String>,
    status: String,
    created_at: i64,
    updated_at: i64,
}

impl RawTask {
    fn into_task(self) -> Result<Task> {
        Ok(Task {
            id: self.id,
            owner: self.owner,
            title: self.title,
            description: self.description,
            content_ref: self.content_ref,
            status: self.status.parse()?,
            created_at: timestamp_from_secs(self.created_at)?,
            updated_at: timestamp_from_secs(self.updated_at)?,
        })
    }
}

pub(crate) fn timestamp_from_secs(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StoreError::invalid_data(format!("timestamp out of range: {secs}")))
}

const SELECT_TASK: &str =
    "SELECT id, owner, title, description, content_ref, status, created_at, updated_at FROM tasks";

impl TaskStore for SqliteTaskStore {
    fn create(
        &mut self,
        owner: &str,
        title: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<Task> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        conn.execute(
            "INSERT INTO tasks (owner, title, description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                owner,
                title,
                description,
                TaskStatus::Draft.as_str(),
                now.timestamp()
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(task_id = id, owner, "created draft task");

        Ok(Task::new_draft(id, owner, title, description, now))
    }

    fn load(&self, id: TaskId) -> Result<Option<Task>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let raw = conn
            .query_row(
                &format!("{SELECT_TASK} WHERE id = ?1"),
                [id],
                Self::deserialize_task,
            )
            .optional()?;

        raw.map(RawTask::into_task).transpose()
    }

    fn list_for_owner(&self, owner: &str) -> Result<Vec<Task>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let mut stmt =
            conn.prepare(&format!("{SELECT_TASK} WHERE owner = ?1 ORDER BY created_at DESC"))?;

        let raws: Vec<RawTask> = stmt
            .query_map([owner], Self::deserialize_task)?
            .collect::<rusqlite::Result<_>>()?;

        raws.into_iter().map(RawTask::into_task).collect()
    }

    fn set_status(&mut self, id: TaskId, status: TaskStatus, now: DateTime<Utc>) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let updated = conn.execute(
            "UPDATE tasks SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status.as_str(), now.timestamp()],
        )?;
        if updated == 0 {
            return Err(StoreError::TaskNotFound(id));
        }
        Ok(())
    }

    fn activate_if_draft(&mut self, id: TaskId, now: DateTime<Utc>) -> Result<bool> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        // Conditional update: the status check and the write are one
        // statement, so a concurrent duplicate delivery cannot slip between
        // a read and a write.
        let updated = conn.execute(
            "UPDATE tasks SET status = ?2, updated_at = ?3 WHERE id = ?1 AND status = ?4",
            params![
                id,
                TaskStatus::Active.as_str(),
                now.timestamp(),
                TaskStatus::Draft.as_str()
            ],
        )?;

        debug!(task_id = id, transitioned = updated > 0, "activate_if_draft");
        Ok(updated > 0)
    }
}
