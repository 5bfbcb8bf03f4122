//! Qubit handles and their lifecycle.
//!
//! The execution engine owns handle creation; a backend only observes
//! handles through `allocate`/`release` and gate events.
//!
//! ```text
//!   allocate() ──→ Live ──→ release() ──→ Released
//! ```
//!
//! **Invariants:**
//! - A handle is used only between its allocation and its release.
//! - A handle is never allocated again while it is still live.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, EstimatorResult};

/// Opaque identifier for a logical qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Create a new qubit handle.
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for QubitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Outcome of a measurement.
///
/// Cost-accounting backends never evolve state and always report
/// [`MeasurementOutcome::Zero`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeasurementOutcome {
    #[default]
    Zero,
    One,
}

impl std::fmt::Display for MeasurementOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementOutcome::Zero => write!(f, "Zero"),
            MeasurementOutcome::One => write!(f, "One"),
        }
    }
}

/// Set of currently live qubit handles.
///
/// Batch operations validate every handle before mutating, so a rejected
/// batch leaves the registry untouched.
#[derive(Debug, Clone, Default)]
pub struct QubitRegistry {
    live: FxHashSet<QubitId>,
}

impl QubitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a batch of handles live.
    ///
    /// Fails if any handle is already live or appears twice in the batch.
    pub fn allocate(&mut self, qubits: &[QubitId]) -> EstimatorResult<()> {
        let mut batch = FxHashSet::default();
        for &qubit in qubits {
            if self.live.contains(&qubit) || !batch.insert(qubit) {
                return Err(EstimatorError::IllegalQubitUse {
                    operation: "allocate",
                    qubit,
                    reason: "handle is already live",
                });
            }
        }
        self.live.extend(batch);
        Ok(())
    }

    /// Retire a batch of handles.
    pub fn release(&mut self, qubits: &[QubitId]) -> EstimatorResult<()> {
        let mut batch = FxHashSet::default();
        for &qubit in qubits {
            self.check("release", qubit)?;
            if !batch.insert(qubit) {
                return Err(EstimatorError::IllegalQubitUse {
                    operation: "release",
                    qubit,
                    reason: "handle released twice in one batch",
                });
            }
        }
        for qubit in batch {
            self.live.remove(&qubit);
        }
        Ok(())
    }

    /// Ensure `qubit` is live before `operation` touches it.
    pub fn check(&self, operation: &'static str, qubit: QubitId) -> EstimatorResult<()> {
        if self.live.contains(&qubit) {
            Ok(())
        } else {
            Err(EstimatorError::IllegalQubitUse {
                operation,
                qubit,
                reason: "handle is not allocated",
            })
        }
    }

    /// Check if a handle is live.
    pub fn is_live(&self, qubit: QubitId) -> bool {
        self.live.contains(&qubit)
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Check if no handle is live.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qubits(ids: &[u32]) -> Vec<QubitId> {
        ids.iter().copied().map(QubitId).collect()
    }

    #[test]
    fn test_qubit_id_display() {
        let q: QubitId = 4.into();
        assert_eq!(q.to_string(), "q4");
        assert_eq!(QubitId::new(4), q);
    }

    #[test]
    fn test_registry_lifecycle() {
        let mut reg = QubitRegistry::new();
        reg.allocate(&qubits(&[0, 1, 2])).unwrap();
        assert_eq!(reg.len(), 3);
        assert!(reg.check("h", QubitId(1)).is_ok());

        reg.release(&qubits(&[1])).unwrap();
        assert!(!reg.is_live(QubitId(1)));
        assert!(matches!(
            reg.check("h", QubitId(1)),
            Err(EstimatorError::IllegalQubitUse { operation: "h", .. })
        ));

        // Released handles may be handed out again.
        reg.allocate(&qubits(&[1])).unwrap();
        assert!(reg.is_live(QubitId(1)));
    }

    #[test]
    fn test_registry_rejects_live_reuse() {
        let mut reg = QubitRegistry::new();
        reg.allocate(&qubits(&[0])).unwrap();
        let err = reg.allocate(&qubits(&[5, 0])).unwrap_err();
        assert!(matches!(
            err,
            EstimatorError::IllegalQubitUse {
                qubit: QubitId(0),
                ..
            }
        ));
        // Nothing from the rejected batch became live.
        assert!(!reg.is_live(QubitId(5)));
    }

    #[test]
    fn test_registry_rejects_duplicate_in_batch() {
        let mut reg = QubitRegistry::new();
        assert!(reg.allocate(&qubits(&[3, 3])).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_registry_release_is_atomic() {
        let mut reg = QubitRegistry::new();
        reg.allocate(&qubits(&[0, 1])).unwrap();
        assert!(reg.release(&qubits(&[0, 9])).is_err());
        assert!(reg.is_live(QubitId(0)));
        assert!(reg.release(&qubits(&[1, 1])).is_err());
        assert!(reg.is_live(QubitId(1)));
    }

    #[test]
    fn test_measurement_outcome_default() {
        assert_eq!(MeasurementOutcome::default(), MeasurementOutcome::Zero);
        assert_eq!(MeasurementOutcome::One.to_string(), "One");
    }
}
