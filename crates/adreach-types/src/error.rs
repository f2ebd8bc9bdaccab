//! Parse errors for enumerated types.

use thiserror::Error;

/// Errors produced when parsing stored or wire strings into typed enums.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeError {
    /// String does not name a supported platform.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    /// String does not name a task status.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),

    /// String does not name a payment method.
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),
}
