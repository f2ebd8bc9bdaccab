//! End-to-End Payment Flow Tests
//!
//! These tests verify the complete Draft → Price → Checkout → Notify →
//! Active flow: the buyer composes a task, the pricing engine quotes it,
//! the gateway reports the payment, and the task goes live exactly once.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use adreach_ops::{IgnoreReason, MarketOps, NotifyOutcome, OpsError};
use adreach_payhere::{notify_signature, PayHereConfig};
use adreach_store::{CostStore, MarketStore, MarketStoreConfig, TargetStore, TaskStore};
use adreach_types::{Platform, TaskId, TaskStatus, TaskTarget};

// ============ TEST HARNESS ============

const MERCHANT_ID: &str = "M1001";
const SECRET: &str = "integration-secret";

/// A marketplace with its own on-disk store.
struct TestMarket {
    ops: MarketOps,
    _temp_dir: TempDir,
}

impl TestMarket {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = MarketStoreConfig::new(temp_dir.path());
        let store = MarketStore::open(config).unwrap();
        let payhere = PayHereConfig::sandbox(MERCHANT_ID, SECRET, "https://adreach.example");
        Self {
            ops: MarketOps::new(store, payhere),
            _temp_dir: temp_dir,
        }
    }

    /// Create a draft task with targets and a finalized cost.
    fn priced_task(&mut self, targets: &[(Platform, &str, Option<&str>)]) -> TaskId {
        let task = self
            .ops
            .state_mut()
            .tasks
            .create("buyer-1", "Spring launch", "promote the launch video", now())
            .unwrap();
        for &(platform, views, due) in targets {
            let due = due.map(|d| d.parse().unwrap());
            self.ops
                .state_mut()
                .targets
                .insert(&TaskTarget::new(task.id, platform, views, due))
                .unwrap();
        }
        self.ops
            .finalize_task_cost(task.id, "buyer-1", now())
            .unwrap();
        task.id
    }

    fn notify(&mut self, fields: &HashMap<String, String>) -> Result<NotifyOutcome, OpsError> {
        self.ops.handle_payment_notification(
            "multipart/form-data; boundary=xYz",
            "PayHere (Notify v2)",
            fields,
            now(),
        )
    }

    fn task_status(&self, task_id: TaskId) -> TaskStatus {
        self.ops.state().tasks.load(task_id).unwrap().unwrap().status
    }

    fn is_paid(&self, task_id: TaskId) -> bool {
        self.ops.state().costs.load(task_id).unwrap().unwrap().is_paid
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// A correctly signed success/failure notification body for a task.
fn signed_fields(task_id: TaskId, amount: &str, status_code: i32) -> HashMap<String, String> {
    let sig = notify_signature(
        MERCHANT_ID,
        &task_id.to_string(),
        amount,
        "LKR",
        status_code,
        SECRET,
    );
    HashMap::from([
        ("merchant_id".to_string(), MERCHANT_ID.to_string()),
        ("order_id".to_string(), task_id.to_string()),
        ("payhere_amount".to_string(), amount.to_string()),
        ("payhere_currency".to_string(), "LKR".to_string()),
        ("status_code".to_string(), status_code.to_string()),
        ("md5sig".to_string(), sig),
        ("payment_id".to_string(), "320025466".to_string()),
        ("method".to_string(), "VISA".to_string()),
        ("card_holder_name".to_string(), "B Uyer".to_string()),
    ])
}

// ============ FULL LOOP ============

#[test]
fn test_full_loop_draft_to_active() {
    let mut market = TestMarket::new();

    // Compose: 100K YouTube views due in two days.
    let task_id = market.priced_task(&[(Platform::Youtube, "100K", Some("2026-03-03"))]);
    assert_eq!(market.task_status(task_id), TaskStatus::Draft);

    // Quote: 500 base * 2.0 urgency = 1000, +10% fee = 1100.
    let cost = market.ops.state().costs.load(task_id).unwrap().unwrap();
    assert_eq!(cost.amount, 1100);
    assert!(!cost.is_paid);

    // Checkout: the signed form carries the persisted amount.
    let checkout = market.ops.begin_checkout(task_id, "buyer-1").unwrap();
    assert_eq!(checkout.amount, "1100.00");
    assert_eq!(checkout.order_id, task_id.to_string());
    assert!(checkout.notify_url.ends_with("/api/payments/notify"));

    // Notify: a signed success settles the cost and activates the task.
    let outcome = market
        .notify(&signed_fields(task_id, "1100.00", 2))
        .unwrap();
    assert_eq!(outcome, NotifyOutcome::Applied { task_id });
    assert_eq!(market.task_status(task_id), TaskStatus::Active);
    assert!(market.is_paid(task_id));

    // Gateway metadata landed in the cost record.
    let cost = market.ops.state().costs.load(task_id).unwrap().unwrap();
    let details = cost.metadata.unwrap();
    assert_eq!(details.payment_id.as_deref(), Some("320025466"));
    assert_eq!(details.method.as_deref(), Some("VISA"));
}

#[test]
fn test_replayed_delivery_is_safe() {
    let mut market = TestMarket::new();
    let task_id = market.priced_task(&[(Platform::Tiktok, "50K", None)]);
    let fields = signed_fields(task_id, "165.00", 2);

    assert!(market.notify(&fields).unwrap().is_applied());
    let paid_at = market
        .ops
        .state()
        .costs
        .load(task_id)
        .unwrap()
        .unwrap()
        .paid_at;

    // Same body again: acknowledged, nothing changes.
    let replay = market.notify(&fields).unwrap();
    assert_eq!(
        replay,
        NotifyOutcome::Ignored {
            task_id,
            reason: IgnoreReason::TaskNotDraft(TaskStatus::Active),
        }
    );
    let cost = market.ops.state().costs.load(task_id).unwrap().unwrap();
    assert_eq!(cost.paid_at, paid_at);
}

// ============ REJECTION PATHS ============

#[test]
fn test_tampered_signature_rejected_without_mutation() {
    let mut market = TestMarket::new();
    let task_id = market.priced_task(&[(Platform::Youtube, "100K", Some("2026-03-03"))]);

    let mut fields = signed_fields(task_id, "1100.00", 2);
    fields.insert("payhere_amount".to_string(), "1.00".to_string());

    let err = market.notify(&fields).unwrap_err();
    assert!(matches!(
        err,
        OpsError::Gateway(adreach_payhere::PayHereError::SignatureMismatch)
    ));
    assert_eq!(err.http_status(), 400);
    assert_eq!(market.task_status(task_id), TaskStatus::Draft);
    assert!(!market.is_paid(task_id));
}

#[test]
fn test_non_success_codes_acknowledge_without_mutation() {
    let mut market = TestMarket::new();
    let task_id = market.priced_task(&[(Platform::Youtube, "100K", Some("2026-03-03"))]);

    for code in [0, -1, -2] {
        let outcome = market
            .notify(&signed_fields(task_id, "1100.00", code))
            .unwrap();
        assert!(!outcome.is_applied());
    }
    assert_eq!(market.task_status(task_id), TaskStatus::Draft);
    assert!(!market.is_paid(task_id));

    // The task can still be paid for afterwards.
    assert!(market
        .notify(&signed_fields(task_id, "1100.00", 2))
        .unwrap()
        .is_applied());
}

#[test]
fn test_wrong_secret_rejected() {
    let mut market = TestMarket::new();
    let task_id = market.priced_task(&[(Platform::Youtube, "100K", Some("2026-03-03"))]);

    let sig = notify_signature(
        MERCHANT_ID,
        &task_id.to_string(),
        "1100.00",
        "LKR",
        2,
        "guessed-secret",
    );
    let mut fields = signed_fields(task_id, "1100.00", 2);
    fields.insert("md5sig".to_string(), sig);

    let err = market.notify(&fields).unwrap_err();
    assert_eq!(err.http_status(), 400);
    assert_eq!(market.task_status(task_id), TaskStatus::Draft);
}

// ============ RE-QUOTING ============

#[test]
fn test_requote_then_pay_stale_amount_still_applies() {
    let mut market = TestMarket::new();
    let task_id = market.priced_task(&[(Platform::Youtube, "100K", Some("2026-03-03"))]);

    // Buyer adds a target and re-finalizes; the quote moves on.
    market
        .ops
        .state_mut()
        .targets
        .insert(&TaskTarget::new(task_id, Platform::Instagram, "10K", None))
        .unwrap();
    market
        .ops
        .finalize_task_cost(task_id, "buyer-1", now())
        .unwrap();
    let cost = market.ops.state().costs.load(task_id).unwrap().unwrap();
    assert!(cost.amount > 1100);

    // The gateway confirms the amount that was actually charged; the
    // signature is authoritative, the stale quote is only logged.
    let outcome = market
        .notify(&signed_fields(task_id, "1100.00", 2))
        .unwrap();
    assert!(outcome.is_applied());
    assert_eq!(market.task_status(task_id), TaskStatus::Active);
}
