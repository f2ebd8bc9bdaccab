//! Payment notification handling.
//!
//! The gateway's asynchronous server notification is the only payment
//! signal the marketplace trusts. This module runs it through the full
//! validation pipeline and, on a verified success, settles the cost and
//! activates the task exactly once.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use adreach_payhere::{Notification, StatusCode};
use adreach_store::{CostStore, TaskStore};
use adreach_types::{TaskId, TaskStatus};

use crate::error::{OpsError, OpsResult};
use crate::market_ops::MarketOps;

/// What a verified notification did to the marketplace.
///
/// The gateway is answered ok for both variants; only validation failures
/// (a pipeline error) are surfaced as HTTP errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The cost was settled and the task activated.
    Applied { task_id: TaskId },
    /// The notification was authentic but changed nothing.
    Ignored { task_id: TaskId, reason: IgnoreReason },
}

/// Why an authentic notification was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The transaction did not succeed at the gateway.
    NotSuccess(StatusCode),
    /// The task had already left Draft.
    TaskNotDraft(TaskStatus),
    /// The cost was already settled (a replayed delivery).
    AlreadyPaid,
}

impl NotifyOutcome {
    /// Whether this delivery changed state.
    pub fn is_applied(&self) -> bool {
        matches!(self, NotifyOutcome::Applied { .. })
    }
}

impl MarketOps {
    /// Handle a gateway server notification.
    ///
    /// Pipeline, strictly in order:
    /// 1. Transport validation (content type, client identity)
    /// 2. Field validation (presence, formats, closed status-code set)
    /// 3. Signature verification against the merchant secret
    /// 4. Business-state guard (successful transaction, task in Draft)
    /// 5. Apply: mark the cost paid and activate the task
    ///
    /// Steps 1-3 reject with an error and mutate nothing. From step 4 on
    /// the notification is authentic, so every outcome is acknowledged:
    /// non-success codes, non-Draft tasks and replayed deliveries are
    /// logged no-ops. Both state writes are conditional single-row
    /// updates, which makes redelivery and concurrent delivery safe.
    pub fn handle_payment_notification(
        &mut self,
        content_type: &str,
        client: &str,
        fields: &HashMap<String, String>,
        now: DateTime<Utc>,
    ) -> OpsResult<NotifyOutcome> {
        // 1-2. Transport, then fields
        Notification::validate_transport(content_type, client)?;
        let notification = Notification::from_fields(fields)?;
        let task_id = notification.task_id;

        // 3. Signature
        notification.verify(&self.payhere.merchant_secret)?;

        // 4. Business-state guard
        if notification.status != StatusCode::Success {
            info!(
                task_id,
                status = ?notification.status,
                "gateway reported non-success, acknowledging without changes"
            );
            return Ok(NotifyOutcome::Ignored {
                task_id,
                reason: IgnoreReason::NotSuccess(notification.status),
            });
        }

        let task = self
            .state
            .tasks
            .load(task_id)?
            .ok_or(OpsError::TaskNotFound(task_id))?;
        if task.status != TaskStatus::Draft {
            info!(
                task_id,
                status = ?task.status,
                "payment notification for non-draft task, acknowledging without changes"
            );
            return Ok(NotifyOutcome::Ignored {
                task_id,
                reason: IgnoreReason::TaskNotDraft(task.status),
            });
        }

        // The signature is authoritative; a stale quote only gets logged.
        let cost = self
            .state
            .costs
            .load(task_id)?
            .ok_or(OpsError::CostNotFound(task_id))?;
        if cost.amount_string() != notification.amount {
            warn!(
                task_id,
                expected = %cost.amount_string(),
                received = %notification.amount,
                "notification amount differs from stored cost"
            );
        }

        // 5. Apply. Two conditional writes; if the activation write fails
        // after the cost settled, the gateway gets a 500 and the redelivery
        // finds the cost paid and finishes the activation here.
        let paid_now = self
            .state
            .costs
            .mark_paid_if_unpaid(task_id, &notification.details, now)?;
        let activated = self
            .state
            .tasks
            .activate_if_draft(task_id, now)
            .map_err(|e| OpsError::PaidButNotActivated {
                task_id,
                reason: e.to_string(),
            })?;

        if paid_now || activated {
            info!(task_id, paid_now, activated, "payment applied, task active");
            Ok(NotifyOutcome::Applied { task_id })
        } else {
            info!(task_id, "replayed payment notification, already settled");
            Ok(NotifyOutcome::Ignored {
                task_id,
                reason: IgnoreReason::AlreadyPaid,
            })
        }
    }
}
