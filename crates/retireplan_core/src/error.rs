use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An input fell outside its documented bounds.
///
/// Raised before any simulation work begins, so a caller never receives a
/// partially computed result alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Arithmetic failures inside the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// Statistics were requested over zero trials
    #[error("cannot summarise an empty sample")]
    EmptySample,

    /// A computation produced NaN or infinity
    #[error("{quantity} is not finite ({inputs})")]
    NonFinite {
        quantity: &'static str,
        inputs: String,
    },

    /// A required divisor was zero or negative
    #[error("{quantity} has a zero denominator ({inputs})")]
    ZeroDenominator {
        quantity: &'static str,
        inputs: String,
    },
}

/// The requested iteration count exceeded the hard cap and was clamped.
///
/// This is a notice rather than a failure: the run proceeds with `cap`
/// trials and the notice is attached to the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("requested {requested} iterations, clamped to {cap}")]
pub struct ResourceLimit {
    pub requested: usize,
    pub cap: usize,
}

/// Top-level error for engine entry points
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Calculation(#[from] CalculationError),

    /// Monte Carlo run was cancelled between trials
    #[error("simulation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Reject NaN/infinite results, naming the quantity and the inputs that
/// produced it.
pub(crate) fn ensure_finite(
    value: f64,
    quantity: &'static str,
    inputs: impl FnOnce() -> String,
) -> std::result::Result<f64, CalculationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::NonFinite {
            quantity,
            inputs: inputs(),
        })
    }
}
