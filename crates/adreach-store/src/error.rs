//! Error types for the storage layer.

use adreach_types::TaskId;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Task not found in store.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// Cost record not found for a task.
    #[error("Cost record not found for task: {0}")]
    CostNotFound(TaskId),

    /// Stored value could not be decoded into its typed form.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Schema initialization error.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Lock poisoning error.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        StoreError::InvalidData(msg.into())
    }

    /// Create a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        StoreError::Schema(msg.into())
    }

    /// Create a lock poisoned error.
    pub fn lock_poisoned(msg: impl Into<String>) -> Self {
        StoreError::LockPoisoned(msg.into())
    }
}

impl From<adreach_types::TypeError> for StoreError {
    fn from(e: adreach_types::TypeError) -> Self {
        StoreError::InvalidData(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::TaskNotFound(42);
        assert!(err.to_string().contains("42"));

        let err = StoreError::CostNotFound(7);
        assert!(err.to_string().contains("Cost record"));
    }

    #[test]
    fn test_error_from_type_error() {
        let type_err = adreach_types::TypeError::UnknownStatus("pending".into());
        let store_err: StoreError = type_err.into();
        assert!(matches!(store_err, StoreError::InvalidData(_)));
    }
}
