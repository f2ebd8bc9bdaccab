//! Error types for the PayHere gateway protocol.

use thiserror::Error;

/// Result type for PayHere operations.
pub type PayHereResult<T> = Result<T, PayHereError>;

/// Errors that can occur while handling gateway traffic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PayHereError {
    /// Request body is not a form the gateway would send.
    #[error("unsupported content type: {content_type}")]
    UnsupportedContentType {
        /// The declared content type.
        content_type: String,
    },

    /// Caller does not present the gateway's client signature.
    #[error("unknown client: {client}")]
    UnknownClient {
        /// The declared client identity.
        client: String,
    },

    /// A required notification field is absent or empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },

    /// Order id is not a plain decimal task id.
    #[error("invalid order id: {value}")]
    InvalidOrderId {
        /// The offending value.
        value: String,
    },

    /// Amount is not in the gateway's `NNNN` or `NNNN.NN` form.
    #[error("invalid amount: {value}")]
    InvalidAmount {
        /// The offending value.
        value: String,
    },

    /// Currency other than the single supported one.
    #[error("unsupported currency: {currency}")]
    UnsupportedCurrency {
        /// The offending currency code.
        currency: String,
    },

    /// Status code outside the gateway's closed set.
    #[error("invalid status code: {value}")]
    InvalidStatusCode {
        /// The offending value.
        value: String,
    },

    /// Recomputed signature does not match the received one.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// Gateway configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PayHereError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        PayHereError::Config(msg.into())
    }

    /// Name of the offending field, for boundary-rejection logs.
    pub fn offending_field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } => Some(field),
            Self::InvalidOrderId { .. } => Some("order_id"),
            Self::InvalidAmount { .. } => Some("payhere_amount"),
            Self::UnsupportedCurrency { .. } => Some("payhere_currency"),
            Self::InvalidStatusCode { .. } => Some("status_code"),
            Self::SignatureMismatch => Some("md5sig"),
            _ => None,
        }
    }

    /// HTTP status code appropriate for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Config(_) => 500,
            _ => 400,
        }
    }
}
