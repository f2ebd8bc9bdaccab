//! Pricing error types.

use thiserror::Error;

/// Result type for pricing operations.
pub type PricingResult<T> = std::result::Result<T, PricingError>;

/// Errors that can occur during price computation.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum PricingError {
    /// View-count string could not be parsed.
    #[error("invalid view count: {input:?}")]
    InvalidViewCount {
        /// The offending input string.
        input: String,
    },

    /// View count overflows the supported range.
    #[error("view count out of range: {input:?}")]
    ViewCountOutOfRange {
        /// The offending input string.
        input: String,
    },
}

impl PricingError {
    /// Create an invalid view count error.
    pub fn invalid_views(input: impl Into<String>) -> Self {
        PricingError::InvalidViewCount {
            input: input.into(),
        }
    }

    /// Create an out-of-range view count error.
    pub fn views_out_of_range(input: impl Into<String>) -> Self {
        PricingError::ViewCountOutOfRange {
            input: input.into(),
        }
    }
}
