//! Per-platform view target storage.

use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};

use adreach_types::{Platform, TaskId, TaskTarget};

use crate::error::{Result, StoreError};
use crate::traits::TargetStore;

/// SQLite-based target storage.
pub struct SqliteTargetStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTargetStore {
    /// Create a new target store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl TargetStore for SqliteTargetStore {
    fn insert(&mut self, target: &TaskTarget) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        conn.execute(
            "INSERT INTO task_targets (task_id, platform, views, due_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                target.task_id,
                target.platform.as_str(),
                target.views,
                target.due_date.map(|d| d.to_string()),
            ],
        )?;
        Ok(())
    }

    fn list_for_task(&self, task_id: TaskId) -> Result<Vec<TaskTarget>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let mut stmt = conn.prepare(
            "SELECT task_id, platform, views, due_date FROM task_targets
             WHERE task_id = ?1 ORDER BY platform ASC",
        )?;

        let rows: Vec<(TaskId, String, String, Option<String>)> = stmt
            .query_map([task_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<rusqlite::Result<_>>()?;

        rows.into_iter()
            .map(|(task_id, platform, views, due_date)| {
                let platform: Platform = platform.parse()?;
                let due_date = due_date
                    .map(|d| {
                        d.parse().map_err(|_| {
                            StoreError::invalid_data(format!("bad due date: {d}"))
                        })
                    })
                    .transpose()?;
                Ok(TaskTarget {
                    task_id,
                    platform,
                    views,
                    due_date,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::initialize_schema;
    use chrono::NaiveDate;

    fn store() -> SqliteTargetStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        SqliteTargetStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_insert_and_list() {
        let mut targets = store();
        let due = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();

        targets
            .insert(&TaskTarget::new(1, Platform::Youtube, "100K", Some(due)))
            .unwrap();
        targets
            .insert(&TaskTarget::new(1, Platform::Instagram, "10K", None))
            .unwrap();
        targets
            .insert(&TaskTarget::new(2, Platform::Tiktok, "1M", None))
            .unwrap();

        let listed = targets.list_for_task(1).unwrap();
        assert_eq!(listed.len(), 2);

        let youtube = listed
            .iter()
            .find(|t| t.platform == Platform::Youtube)
            .unwrap();
        assert_eq!(youtube.views, "100K");
        assert_eq!(youtube.due_date, Some(due));

        let instagram = listed
            .iter()
            .find(|t| t.platform == Platform::Instagram)
            .unwrap();
        assert!(instagram.due_date.is_none());
    }

    #[test]
    fn test_duplicate_platform_rejected() {
        let mut targets = store();
        targets
            .insert(&TaskTarget::new(1, Platform::Youtube, "100K", None))
            .unwrap();
        let result = targets.insert(&TaskTarget::new(1, Platform::Youtube, "200K", None));
        assert!(result.is_err());
    }

    #[test]
    fn test_list_empty() {
        let targets = store();
        assert!(targets.list_for_task(9).unwrap().is_empty());
    }
}
