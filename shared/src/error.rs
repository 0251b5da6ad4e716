//! Error types for the shared crate
//!
//! Domain errors of the order lifecycle, used by every crate in the workspace

use thiserror::Error;

/// Order lifecycle error
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Status machine invoked on a terminal or unrecognized status
    #[error("Invalid status transition from {from:?}")]
    InvalidTransition { from: String },

    /// Server answered an update/delete with `success: false`
    #[error("Mutation failed: {0}")]
    MutationFailed(String),

    /// Amount invariant violated
    #[error("Order total mismatch: expected {expected:.2}, got {actual:.2}")]
    TotalMismatch { expected: f64, actual: f64 },

    #[error("Negative amount in field {0}")]
    NegativeAmount(&'static str),

    #[error("Line item {item:?} has non-positive quantity")]
    InvalidQuantity { item: String },
}

/// Result type for order lifecycle operations
pub type OrderResult<T> = Result<T, OrderError>;
