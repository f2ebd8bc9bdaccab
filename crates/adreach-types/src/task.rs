//! Task, target and cost types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{PaymentMethod, Platform, TaskStatus};
use crate::{Amount, TaskId};

/// A brand's promotion campaign.
///
/// A task owns its targets (one per platform) and exactly one cost record.
/// A task has cost information only after its targets are finalized, and
/// may only become `Active` after that cost is marked paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier (also the gateway order id).
    pub id: TaskId,
    /// Owning buyer's identity.
    pub owner: String,
    /// Campaign title.
    pub title: String,
    /// Campaign brief shown to influencers.
    pub description: String,
    /// Reference to the promoted content (file key or URL).
    pub content_ref: Option<String>,
    /// Lifecycle state.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new draft task.
    pub fn new_draft(
        id: TaskId,
        owner: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner: owner.into(),
            title: title.into(),
            description: description.into(),
            content_ref: None,
            status: TaskStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the given identity owns this task.
    pub fn is_owned_by(&self, caller: &str) -> bool {
        self.owner == caller
    }
}

/// One (task, platform) view target.
///
/// Created at task finalization and immutable thereafter except by admin
/// correction. The view count keeps the human-entered magnitude string
/// ("100K", "1.5M") as stored; parsing happens in the pricing crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTarget {
    /// Owning task.
    pub task_id: TaskId,
    /// Platform this target applies to.
    pub platform: Platform,
    /// Target view count as a magnitude string.
    pub views: String,
    /// Delivery deadline; `None` means the flexible pricing tier.
    pub due_date: Option<NaiveDate>,
}

impl TaskTarget {
    /// Create a new target.
    pub fn new(
        task_id: TaskId,
        platform: Platform,
        views: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            task_id,
            platform,
            views: views.into(),
            due_date,
        }
    }
}

/// Gateway payment metadata captured from a confirmed notification.
///
/// Stored as a JSON blob on the cost record; every field is optional
/// because bank-transfer payments carry none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Gateway-assigned payment id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Gateway payment method (VISA, MASTER, etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Cardholder name as reported by the gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder_name: Option<String>,
    /// Masked card number (e.g. "************1292").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_no: Option<String>,
    /// Card expiry as reported by the gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_expiry: Option<String>,
}

impl PaymentDetails {
    /// True if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.payment_id.is_none()
            && self.method.is_none()
            && self.card_holder_name.is_none()
            && self.card_no.is_none()
            && self.card_expiry.is_none()
    }
}

/// The single cost record for a task.
///
/// Exactly one per task (upsert semantics). `is_paid` transitions
/// false→true exactly once; that transition triggers the task's
/// Draft→Active move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCost {
    /// Owning task (unique).
    pub task_id: TaskId,
    /// Total amount including the service fee, in whole currency units.
    pub amount: Amount,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
    /// Whether the cost has been settled.
    pub is_paid: bool,
    /// When the cost was settled.
    pub paid_at: Option<DateTime<Utc>>,
    /// Gateway-specific payment metadata.
    pub metadata: Option<PaymentDetails>,
}

impl TaskCost {
    /// Create an unpaid cost record with the default payment method.
    pub fn unpaid(task_id: TaskId, amount: Amount) -> Self {
        Self {
            task_id,
            amount,
            payment_method: PaymentMethod::default(),
            is_paid: false,
            paid_at: None,
            metadata: None,
        }
    }

    /// Set the payment method.
    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    /// Render the amount the way the gateway expects it ("1100.00").
    pub fn amount_string(&self) -> String {
        format!("{}.00", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_ownership() {
        let now = Utc::now();
        let task = Task::new_draft(1, "buyer-1", "Launch", "Promote our launch", now);
        assert!(task.is_owned_by("buyer-1"));
        assert!(!task.is_owned_by("buyer-2"));
        assert_eq!(task.status, TaskStatus::Draft);
    }

    #[test]
    fn test_cost_unpaid_defaults() {
        let cost = TaskCost::unpaid(7, 495);
        assert_eq!(cost.payment_method, PaymentMethod::BankTransfer);
        assert!(!cost.is_paid);
        assert!(cost.paid_at.is_none());
        assert!(cost.metadata.is_none());
    }

    #[test]
    fn test_amount_string_two_decimals() {
        assert_eq!(TaskCost::unpaid(1, 1100).amount_string(), "1100.00");
        assert_eq!(TaskCost::unpaid(1, 0).amount_string(), "0.00");
    }

    #[test]
    fn test_payment_details_json_skips_empty() {
        let details = PaymentDetails {
            payment_id: Some("320025466".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains("payment_id"));
        assert!(!json.contains("card_no"));
    }

    #[test]
    fn test_payment_details_is_empty() {
        assert!(PaymentDetails::default().is_empty());
        let details = PaymentDetails {
            method: Some("VISA".into()),
            ..Default::default()
        };
        assert!(!details.is_empty());
    }
}
