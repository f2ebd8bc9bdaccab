//! Influencer application promise operations.
//!
//! When an influencer applies to a task they commit a view count per
//! platform; each commitment is priced with the creator-side rate table
//! and persisted so the task owner can compare applications.

use tracing::info;

use adreach_pricing::promise_earnings;
use adreach_store::{PromiseStore, TaskStore};
use adreach_types::{ApplicationId, ApplicationPromise, Platform, TaskId, TaskStatus};

use crate::error::{OpsError, OpsResult};
use crate::market_ops::MarketOps;

impl MarketOps {
    /// Record an influencer's promised reach for a task.
    ///
    /// The task must exist and be accepting applications (Active). Each
    /// `(platform, promised_views)` pair becomes one promise row with its
    /// earnings computed from the creator rate table.
    pub fn record_promises(
        &mut self,
        application_id: ApplicationId,
        task_id: TaskId,
        influencer: &str,
        reaches: &[(Platform, u64)],
    ) -> OpsResult<Vec<ApplicationPromise>> {
        if influencer.trim().is_empty() {
            return Err(OpsError::Unauthorized);
        }
        let task = self
            .state
            .tasks
            .load(task_id)?
            .ok_or(OpsError::TaskNotFound(task_id))?;
        if task.status != TaskStatus::Active {
            return Err(OpsError::TaskNotActive(task_id));
        }

        let promises: Vec<ApplicationPromise> = reaches
            .iter()
            .map(|&(platform, promised_views)| ApplicationPromise {
                application_id,
                task_id,
                influencer: influencer.to_string(),
                platform,
                promised_views,
                earnings: promise_earnings(platform, promised_views),
            })
            .collect();

        self.state.promises.insert_all(&promises)?;
        info!(
            application_id,
            task_id,
            platforms = promises.len(),
            "application promises recorded"
        );
        Ok(promises)
    }

    /// Remove all promises for a cancelled application.
    pub fn cancel_application(&mut self, application_id: ApplicationId) -> OpsResult<u32> {
        let removed = self.state.promises.cancel_application(application_id)?;
        info!(application_id, removed, "application cancelled");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adreach_payhere::PayHereConfig;
    use adreach_store::MarketStore;
    use chrono::{TimeZone, Utc};

    fn ops_with_active_task() -> (MarketOps, TaskId) {
        let store = MarketStore::open_in_memory().unwrap();
        let mut ops = MarketOps::new(
            store,
            PayHereConfig::sandbox("M1001", "secret", "https://adreach.example"),
        );
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let task = ops
            .state
            .tasks
            .create("buyer-1", "Spring launch", "promote the video", now)
            .unwrap();
        ops.state
            .tasks
            .set_status(task.id, TaskStatus::Active, now)
            .unwrap();
        (ops, task.id)
    }

    #[test]
    fn test_record_promises_computes_earnings() {
        let (mut ops, task_id) = ops_with_active_task();

        let promises = ops
            .record_promises(
                7,
                task_id,
                "creator-9",
                &[(Platform::Youtube, 10_000), (Platform::Instagram, 5_000)],
            )
            .unwrap();

        assert_eq!(promises.len(), 2);
        assert_eq!(promises[0].earnings, 30); // 10 * 3
        assert_eq!(promises[1].earnings, 20); // 5 * 4

        let stored = ops.state.promises.list_for_task(task_id).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn test_record_promises_requires_active_task() {
        let (mut ops, task_id) = ops_with_active_task();
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        ops.state
            .tasks
            .set_status(task_id, TaskStatus::Completed, now)
            .unwrap();

        let err = ops
            .record_promises(7, task_id, "creator-9", &[(Platform::Tiktok, 1_000)])
            .unwrap_err();
        assert!(matches!(err, OpsError::TaskNotActive(_)));
    }

    #[test]
    fn test_cancel_application_removes_rows() {
        let (mut ops, task_id) = ops_with_active_task();
        ops.record_promises(7, task_id, "creator-9", &[(Platform::Youtube, 10_000)])
            .unwrap();
        ops.record_promises(8, task_id, "creator-3", &[(Platform::Tiktok, 2_000)])
            .unwrap();

        let removed = ops.cancel_application(7).unwrap();
        assert_eq!(removed, 1);

        let remaining = ops.state.promises.list_for_task(task_id).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].application_id, 8);
    }
}
