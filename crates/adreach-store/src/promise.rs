//! Application promise storage.

use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};
use tracing::debug;

use adreach_types::{Amount, ApplicationId, ApplicationPromise, Platform, TaskId};

use crate::error::{Result, StoreError};
use crate::traits::PromiseStore;

/// SQLite-based promise storage.
pub struct SqlitePromiseStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePromiseStore {
    /// Create a new promise store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl PromiseStore for SqlitePromiseStore {
    fn insert_all(&mut self, promises: &[ApplicationPromise]) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        for promise in promises {
            conn.execute(
                "INSERT INTO application_promises
                 (application_id, task_id, influencer, platform, promised_views, earnings)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    promise.application_id,
                    promise.task_id,
                    promise.influencer,
                    promise.platform.as_str(),
                    promise.promised_views as i64,
                    promise.earnings as i64,
                ],
            )?;
        }
        Ok(())
    }

    fn list_for_task(&self, task_id: TaskId) -> Result<Vec<ApplicationPromise>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let mut stmt = conn.prepare(
            "SELECT application_id, task_id, influencer, platform, promised_views, earnings
             FROM application_promises WHERE task_id = ?1
             ORDER BY application_id ASC, platform ASC",
        )?;

        let rows: Vec<(ApplicationId, TaskId, String, String, i64, i64)> = stmt
            .query_map([task_id], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?
            .collect::<rusqlite::Result<_>>()?;

        rows.into_iter()
            .map(
                |(application_id, task_id, influencer, platform, views, earnings)| {
                    let platform: Platform = platform.parse()?;
                    Ok(ApplicationPromise {
                        application_id,
                        task_id,
                        influencer,
                        platform,
                        promised_views: views as u64,
                        earnings: earnings as Amount,
                    })
                },
            )
            .collect()
    }

    fn cancel_application(&mut self, application_id: ApplicationId) -> Result<u32> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let removed = conn.execute(
            "DELETE FROM application_promises WHERE application_id = ?1",
            [application_id],
        )?;

        debug!(application_id, removed, "cancelled application promises");
        Ok(removed as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::initialize_schema;

    fn store() -> SqlitePromiseStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        SqlitePromiseStore::new(Arc::new(Mutex::new(conn)))
    }

    fn promise(application_id: ApplicationId, platform: Platform) -> ApplicationPromise {
        ApplicationPromise {
            application_id,
            task_id: 1,
            influencer: "creator-9".into(),
            platform,
            promised_views: 50_000,
            earnings: 100,
        }
    }

    #[test]
    fn test_insert_and_list() {
        let mut promises = store();
        promises
            .insert_all(&[
                promise(11, Platform::Youtube),
                promise(11, Platform::Tiktok),
                promise(12, Platform::Instagram),
            ])
            .unwrap();

        let listed = promises.list_for_task(1).unwrap();
        assert_eq!(listed.len(), 3);
        assert!(promises.list_for_task(2).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_platform_per_application_rejected() {
        let mut promises = store();
        promises.insert_all(&[promise(11, Platform::Youtube)]).unwrap();
        assert!(promises
            .insert_all(&[promise(11, Platform::Youtube)])
            .is_err());
    }

    #[test]
    fn test_cancel_application_removes_only_its_rows() {
        let mut promises = store();
        promises
            .insert_all(&[
                promise(11, Platform::Youtube),
                promise(11, Platform::Tiktok),
                promise(12, Platform::Instagram),
            ])
            .unwrap();

        let removed = promises.cancel_application(11).unwrap();
        assert_eq!(removed, 2);

        let remaining = promises.list_for_task(1).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].application_id, 12);
    }
}
