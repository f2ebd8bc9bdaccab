//! Error types for the operations layer.
//!
//! This module defines the `OpsError` enum used by all operation
//! functions in this crate.

use adreach_types::TaskId;
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = std::result::Result<T, OpsError>;

/// Errors that can occur during marketplace operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpsError {
    // =========================================================================
    // Authorization Errors
    // =========================================================================
    /// No authenticated caller was supplied.
    #[error("unauthorized: no authenticated caller")]
    Unauthorized,

    /// Caller does not own the task they are operating on.
    #[error("caller does not own task {0}")]
    NotTaskOwner(TaskId),

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// Task not found in storage.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// No cost record exists for the task.
    #[error("no cost record for task {0}")]
    CostNotFound(TaskId),

    // =========================================================================
    // State Errors
    // =========================================================================
    /// Cost record is already settled.
    #[error("cost for task {0} is already paid")]
    CostAlreadyPaid(TaskId),

    /// Task is not accepting applications.
    #[error("task {0} is not active")]
    TaskNotActive(TaskId),

    /// Payment was recorded but the task activation write failed.
    ///
    /// The gateway must see a retryable failure so it redelivers the
    /// notification; the retry finds the cost settled and finishes the
    /// activation.
    #[error("task {task_id} paid but not activated: {reason}")]
    PaidButNotActivated { task_id: TaskId, reason: String },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// Pricing error.
    #[error("pricing error: {0}")]
    Pricing(#[from] adreach_pricing::PricingError),

    /// Gateway protocol error.
    #[error("gateway error: {0}")]
    Gateway(#[from] adreach_payhere::PayHereError),

    /// Storage error.
    #[error("store error: {0}")]
    Store(#[from] adreach_store::StoreError),
}

impl OpsError {
    /// HTTP status code an API surface should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            OpsError::Unauthorized => 401,
            OpsError::NotTaskOwner(_) => 403,
            OpsError::TaskNotFound(_) | OpsError::CostNotFound(_) => 404,
            OpsError::CostAlreadyPaid(_) | OpsError::TaskNotActive(_) => 400,
            OpsError::PaidButNotActivated { .. } => 500,
            OpsError::Pricing(_) => 400,
            OpsError::Gateway(e) => e.http_status(),
            OpsError::Store(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OpsError::TaskNotFound(42);
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(OpsError::Unauthorized.http_status(), 401);
        assert_eq!(OpsError::NotTaskOwner(1).http_status(), 403);
        assert_eq!(OpsError::TaskNotFound(1).http_status(), 404);
        assert_eq!(OpsError::CostNotFound(1).http_status(), 404);
        assert_eq!(OpsError::CostAlreadyPaid(1).http_status(), 400);
        assert_eq!(
            OpsError::PaidButNotActivated {
                task_id: 1,
                reason: "write failed".into()
            }
            .http_status(),
            500
        );
    }

    #[test]
    fn test_gateway_status_passthrough() {
        let err = OpsError::Gateway(adreach_payhere::PayHereError::SignatureMismatch);
        assert_eq!(err.http_status(), 400);
    }
}
