//! Trait definitions for storage components.
//!
//! This module defines the trait contracts for all storage components.
//! Implementations may vary (e.g., in-memory vs SQLite) but must satisfy
//! these interfaces.

use chrono::{DateTime, Utc};

use adreach_types::{
    Amount, ApplicationId, ApplicationPromise, PaymentDetails, PaymentMethod, Task, TaskCost,
    TaskId, TaskStatus, TaskTarget,
};

use crate::error::Result;

// =============================================================================
// Task Storage
// =============================================================================

/// Trait for storing tasks.
pub trait TaskStore {
    /// Create a new draft task and return it with its assigned id.
    fn create(
        &mut self,
        owner: &str,
        title: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<Task>;

    /// Load a task by id.
    ///
    /// Returns `None` if the task doesn't exist.
    fn load(&self, id: TaskId) -> Result<Option<Task>>;

    /// List tasks owned by the given identity, newest first.
    fn list_for_owner(&self, owner: &str) -> Result<Vec<Task>>;

    /// Set a task's status unconditionally.
    ///
    /// Returns an error if the task doesn't exist.
    fn set_status(&mut self, id: TaskId, status: TaskStatus, now: DateTime<Utc>) -> Result<()>;

    /// Move a task to Active only if it is currently Draft.
    ///
    /// A single conditional UPDATE; returns `true` if the row transitioned,
    /// `false` if the task was already past Draft (or missing). This is the
    /// guard that makes payment application exactly-once.
    fn activate_if_draft(&mut self, id: TaskId, now: DateTime<Utc>) -> Result<bool>;
}

// =============================================================================
// Target Storage
// =============================================================================

/// Trait for storing per-platform view targets.
pub trait TargetStore {
    /// Insert a target. One row per (task, platform); a duplicate platform
    /// for the same task is an error.
    fn insert(&mut self, target: &TaskTarget) -> Result<()>;

    /// List all targets for a task.
    fn list_for_task(&self, task_id: TaskId) -> Result<Vec<TaskTarget>>;
}

// =============================================================================
// Cost Storage
// =============================================================================

/// Trait for storing task cost records.
pub trait CostStore {
    /// Upsert the quoted amount for a task, keyed by task id.
    ///
    /// A fresh row starts unpaid with the default payment method. On
    /// recomputation only the amount changes; the payment method and a
    /// settled paid flag are never reset by a re-quote.
    fn upsert_quote(&mut self, task_id: TaskId, amount: Amount) -> Result<TaskCost>;

    /// Set the payment method for an existing cost record.
    fn set_method(&mut self, task_id: TaskId, method: PaymentMethod) -> Result<()>;

    /// Load the cost record for a task.
    ///
    /// Returns `None` if the task has not been priced yet.
    fn load(&self, task_id: TaskId) -> Result<Option<TaskCost>>;

    /// Mark a cost paid only if it is currently unpaid.
    ///
    /// A single conditional UPDATE storing the gateway metadata and paid-at
    /// timestamp; returns `true` on the false→true transition, `false` if
    /// the cost was already paid (or missing).
    fn mark_paid_if_unpaid(
        &mut self,
        task_id: TaskId,
        details: &PaymentDetails,
        paid_at: DateTime<Utc>,
    ) -> Result<bool>;
}

// =============================================================================
// Promise Storage
// =============================================================================

/// Trait for storing influencer application promises.
pub trait PromiseStore {
    /// Insert all promises for an application.
    fn insert_all(&mut self, promises: &[ApplicationPromise]) -> Result<()>;

    /// List promises made against a task.
    fn list_for_task(&self, task_id: TaskId) -> Result<Vec<ApplicationPromise>>;

    /// Remove all promises for a cancelled application.
    ///
    /// Returns the number of rows removed.
    fn cancel_application(&mut self, application_id: ApplicationId) -> Result<u32>;
}
