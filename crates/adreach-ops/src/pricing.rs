//! Cost finalization and checkout operations.
//!
//! `finalize_task_cost` is the single entry point that turns a task's view
//! targets into a persisted cost record; `begin_checkout` turns that record
//! into a signed gateway checkout form.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use adreach_payhere::{build_checkout, CheckoutRequest};
use adreach_pricing::compute_quote;
use adreach_store::{CostStore, TargetStore, TaskStore};
use adreach_types::{Amount, PaymentMethod, Task, TaskId};

use crate::error::{OpsError, OpsResult};
use crate::market_ops::MarketOps;

/// The persisted outcome of cost finalization, as shown to the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostSummary {
    /// Sum of per-platform line costs before the fee.
    pub base_cost: Amount,
    /// Service fee on the base cost.
    pub service_fee: Amount,
    /// Amount the buyer pays; this is what gets persisted.
    pub total_cost: Amount,
}

impl MarketOps {
    /// Compute and persist the cost of a task from its stored view targets.
    ///
    /// 1. Authorizes the caller (must be the task owner)
    /// 2. Loads the task's targets
    /// 3. Computes the quote deterministically at `now`
    /// 4. Upserts the cost record keyed by task id
    ///
    /// Never touches the task's status. Safe to call repeatedly: a re-quote
    /// replaces the amount and nothing else.
    pub fn finalize_task_cost(
        &mut self,
        task_id: TaskId,
        caller: &str,
        now: DateTime<Utc>,
    ) -> OpsResult<CostSummary> {
        let task = self.authorize_owner(task_id, caller)?;

        // 2. Load targets
        let targets = self.state.targets.list_for_task(task_id)?;

        // 3. Compute quote
        let quote = compute_quote(&targets, now)?;

        // 4. Persist; keyed upsert, so repeat calls never duplicate
        self.state.costs.upsert_quote(task_id, quote.total_cost)?;

        info!(
            task_id,
            owner = %task.owner,
            base_cost = quote.base_cost,
            service_fee = quote.service_fee,
            total_cost = quote.total_cost,
            "task cost finalized"
        );

        Ok(CostSummary {
            base_cost: quote.base_cost,
            service_fee: quote.service_fee,
            total_cost: quote.total_cost,
        })
    }

    /// Build the signed gateway checkout form for a priced task.
    ///
    /// Requires an unpaid cost record; switches the record to the gateway
    /// payment method before handing the form back.
    pub fn begin_checkout(&mut self, task_id: TaskId, caller: &str) -> OpsResult<CheckoutRequest> {
        let task = self.authorize_owner(task_id, caller)?;

        let cost = self
            .state
            .costs
            .load(task_id)?
            .ok_or(OpsError::CostNotFound(task_id))?;
        if cost.is_paid {
            return Err(OpsError::CostAlreadyPaid(task_id));
        }

        self.state
            .costs
            .set_method(task_id, PaymentMethod::PayhereGateway)?;

        let request = build_checkout(&self.payhere, task_id, &task.title, cost.amount)?;
        info!(task_id, amount = %request.amount, "checkout form built");
        Ok(request)
    }

    /// Load a task and check the caller owns it.
    pub(crate) fn authorize_owner(&self, task_id: TaskId, caller: &str) -> OpsResult<Task> {
        if caller.trim().is_empty() {
            return Err(OpsError::Unauthorized);
        }
        let task = self
            .state
            .tasks
            .load(task_id)?
            .ok_or(OpsError::TaskNotFound(task_id))?;
        if !task.is_owned_by(caller) {
            return Err(OpsError::NotTaskOwner(task_id));
        }
        Ok(task)
    }
}
