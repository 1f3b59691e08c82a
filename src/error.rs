//! Error types for product validation and configuration loading

use thiserror::Error;

/// Convenience result alias for fallible library operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Rejected product parameters
///
/// Raised when a product descriptor is constructed, so an engine never sees
/// a zero coupon frequency, an empty tier schedule or a non-positive price.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Non-positive or unrepresentably long duration or frequency
    #[error("invalid period for {field}: {value}")]
    InvalidPeriod { field: &'static str, value: f64 },

    /// Non-positive principal, price or share count
    #[error("invalid amount for {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    /// Negative, out-of-range or non-finite rate
    #[error("invalid rate for {field}: {value}")]
    InvalidRate { field: &'static str, value: f64 },

    /// Savings account with no interest rate tiers
    #[error("interest rate schedule has no tiers")]
    EmptySchedule,
}

/// Top-level library error
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Require `value > 0` (rejects NaN as well)
pub(crate) fn positive_amount(field: &'static str, value: f64) -> std::result::Result<f64, ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::InvalidAmount { field, value })
    }
}

/// Require `value >= 0`
pub(crate) fn non_negative_amount(field: &'static str, value: f64) -> std::result::Result<f64, ValidationError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::InvalidAmount { field, value })
    }
}

/// Require a finite rate `>= 0`
pub(crate) fn non_negative_rate(field: &'static str, value: f64) -> std::result::Result<f64, ValidationError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::InvalidRate { field, value })
    }
}
