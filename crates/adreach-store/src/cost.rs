//! Task cost storage.
//!
//! Exactly one cost row per task. Quoting upserts the amount; marking paid
//! is a conditional update so the false→true transition happens exactly
//! once even under duplicate gateway deliveries.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use adreach_types::{Amount, PaymentDetails, PaymentMethod, TaskCost, TaskId};

use crate::error::{Result, StoreError};
use crate::task::timestamp_from_secs;
use crate::traits::CostStore;

/// SQLite-based cost storage.
pub struct SqliteCostStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCostStore {
    /// Create a new cost store with the given database connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Deserialize a cost record from a database row.
    fn deserialize_cost(row: &rusqlite::Row) -> rusqlite::Result<RawCost> {
        Ok(RawCost {
            task_id: row.get(0)?,
            amount: row.get(1)?,
            payment_method: row.get(2)?,
            is_paid: row.get(3)?,
            paid_at: row.get(4)?,
            metadata: row.get(5)?,
        })
    }
}

/// Row image before typed decoding.
struct RawCost {
    task_id: TaskId,
    amount: i64,
    payment_method: String,
    is_paid: bool,
    paid_at: Option<i64>,
    metadata: Option<String>,
}

impl RawCost {
    fn into_cost(self) -> Result<TaskCost> {
        let metadata = self
            .metadata
            .as_deref()
            .map(serde_json::from_str::<PaymentDetails>)
            .transpose()?;
        Ok(TaskCost {
            task_id: self.task_id,
            amount: self.amount as Amount,
            payment_method: self.payment_method.parse()?,
            is_paid: self.is_paid,
            paid_at: self.paid_at.map(timestamp_from_secs).transpose()?,
            metadata,
        })
    }
}

const SELECT_COST: &str =
    "SELECT task_id, amount, payment_method, is_paid, paid_at, metadata FROM task_costs";

impl CostStore for SqliteCostStore {
    fn upsert_quote(&mut self, task_id: TaskId, amount: Amount) -> Result<TaskCost> {
        {
            let conn = self
                .conn
                .lock()
                .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

            // Keyed by task id: recomputation overwrites the amount, never
            // duplicates the row. The payment method and a settled paid flag
            // survive a re-quote.
            conn.execute(
                "INSERT INTO task_costs (task_id, amount, payment_method, is_paid)
                 VALUES (?1, ?2, ?3, 0)
                 ON CONFLICT(task_id) DO UPDATE SET amount = excluded.amount",
                params![task_id, amount as i64, PaymentMethod::default().as_str()],
            )?;
        }

        debug!(task_id, amount, "upserted task cost");
        self.load(task_id)?.ok_or(StoreError::CostNotFound(task_id))
    }

    fn set_method(&mut self, task_id: TaskId, method: PaymentMethod) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let updated = conn.execute(
            "UPDATE task_costs SET payment_method = ?2 WHERE task_id = ?1",
            params![task_id, method.as_str()],
        )?;
        if updated == 0 {
            return Err(StoreError::CostNotFound(task_id));
        }
        Ok(())
    }

    fn load(&self, task_id: TaskId) -> Result<Option<TaskCost>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        let raw = conn
            .query_row(
                &format!("{SELECT_COST} WHERE task_id = ?1"),
                [task_id],
                Self::deserialize_cost,
            )
            .optional()?;

        raw.map(RawCost::into_cost).transpose()
    }

    fn mark_paid_if_unpaid(
        &mut self,
        task_id: TaskId,
        details: &PaymentDetails,
        paid_at: DateTime<Utc>,
    ) -> Result<bool> {
        let metadata = serde_json::to_string(details)?;
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::lock_poisoned("database connection lock poisoned"))?;

        // Conditional update: is_paid flips false→true at most once.
        let updated = conn.execute(
            "UPDATE task_costs SET is_paid = 1, paid_at = ?2, metadata = ?3
             WHERE task_id = ?1 AND is_paid = 0",
            params![task_id, paid_at.timestamp(), metadata],
        )?;

        debug!(task_id, transitioned = updated > 0, "mark_paid_if_unpaid");
        Ok(updated > 0)
    }
}
