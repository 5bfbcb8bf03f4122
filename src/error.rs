//! Estimator error types.
//!
//! Every error aborts the run in progress. Resource accounting is
//! deterministic, so there is nothing to retry: a failure means the event
//! stream or the platform configuration is wrong, and any partially filled
//! ledger must be discarded.
//!
//! | Category | Variants | Recovery |
//! |----------|----------|----------|
//! | **Usage** | `UnsupportedArity`, `UnsupportedAxis`, `IllegalQubitUse`, `InvalidAngle` | Fix the event stream |
//! | **Config** | `Configuration` | Fix the platform parameters |
//! | **Input** | `Serialization`, `Io` | Fix the platform or trace file |

use thiserror::Error;

use crate::qubit::QubitId;

/// Errors raised while lowering and accounting a gate stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EstimatorError {
    // ── Usage errors (fix the event stream) ─────────────────────────
    /// A controlled gate was requested with a number of controls the
    /// platform cannot lower.
    #[error("Unsupported arity: {operation} with {controls} control qubits (exactly one supported)")]
    UnsupportedArity {
        /// Logical operation that was rejected.
        operation: &'static str,
        /// Number of controls supplied.
        controls: usize,
    },

    /// A rotation axis outside `{I, X, Y, Z}`.
    #[error("Unsupported axis: {0}")]
    UnsupportedAxis(String),

    /// A gate touched a qubit handle that is not currently allocated, or an
    /// allocation reused a live handle.
    #[error("Illegal use of qubit {qubit} in {operation}: {reason}")]
    IllegalQubitUse {
        /// Logical operation that was rejected.
        operation: &'static str,
        /// Offending handle.
        qubit: QubitId,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A rotation angle that is NaN or infinite.
    #[error("Invalid angle {angle} in {operation}: must be finite")]
    InvalidAngle {
        /// Logical operation that was rejected.
        operation: &'static str,
        /// Angle supplied (radians).
        angle: f64,
    },

    // ── Config errors ───────────────────────────────────────────────
    /// Invalid platform cost parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Input errors ────────────────────────────────────────────────
    /// A platform or trace document could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A platform or trace file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EstimatorError {
    /// Returns `true` if the error points at a malformed event stream rather
    /// than at the platform configuration or an input file.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedArity { .. }
                | Self::UnsupportedAxis(_)
                | Self::IllegalQubitUse { .. }
                | Self::InvalidAngle { .. }
        )
    }
}

impl From<serde_json::Error> for EstimatorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type for estimator operations.
pub type EstimatorResult<T> = Result<T, EstimatorError>;
