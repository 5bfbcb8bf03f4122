//! Backend capability contract.
//!
//! The execution engine drives an algorithm and issues one event at a time,
//! in program order, into whichever [`Backend`] is installed:
//!
//! ```text
//!   allocate() ──→ gates / measure() / reset() ──→ release()
//!        ▲                                             │
//!        └──────────── operation_start(name) ──────────┘
//! ```
//!
//! ## Design principles
//!
//! - **Synchronous**: every call is fully processed, including any
//!   decomposition and accounting, before the next event is issued.
//! - **Exclusive**: methods take `&mut self`; one instance serves one run
//!   and is never shared across runs.
//! - **Fail fast**: any error is unrecoverable for the run in progress.
//! - **Composable**: variants (cost estimator, frequency tracker, a
//!   full-state simulator elsewhere) implement the trait independently and
//!   are chosen at run setup.
//!
//! ## Method table
//!
//! | Method | Required | Returns |
//! |--------|----------|---------|
//! | `name()` | yes | `&str` |
//! | `allocate()` / `release()` | yes | `EstimatorResult<()>` |
//! | `rotation()` | yes | `EstimatorResult<()>` |
//! | `controlled_x()` | yes | `EstimatorResult<()>` |
//! | `h()` | yes | `EstimatorResult<()>` |
//! | `measure()` | yes | `EstimatorResult<MeasurementOutcome>` |
//! | `reset()` | yes | `EstimatorResult<()>` |
//! | `x()` / `y()` / `z()` | provided | π rotation about the axis |
//! | `operation_start()` | provided | no-op |
//! | `apply()` | provided | routes a [`LogicalGateRequest`] |

use std::f64::consts::PI;

use crate::error::EstimatorResult;
use crate::gate::{LogicalGateRequest, Pauli};
use crate::qubit::{MeasurementOutcome, QubitId};

/// Trait for consumers of the circuit-execution event stream.
///
/// # Contract
///
/// - Qubits are allocated before first use and never referenced after
///   release. Handles are never reused while live.
/// - A call that returns an error MUST NOT have changed any accounting
///   state.
/// - After an error the run is void; callers discard the backend.
pub trait Backend {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// A batch of qubits was allocated.
    fn allocate(&mut self, qubits: &[QubitId]) -> EstimatorResult<()>;

    /// A batch of qubits was released.
    fn release(&mut self, qubits: &[QubitId]) -> EstimatorResult<()>;

    /// Rotation by `angle` about a Pauli axis.
    fn rotation(&mut self, axis: Pauli, angle: f64, qubit: QubitId) -> EstimatorResult<()>;

    /// Controlled X. Backends may restrict the number of controls.
    fn controlled_x(&mut self, controls: &[QubitId], target: QubitId) -> EstimatorResult<()>;

    /// Hadamard.
    fn h(&mut self, qubit: QubitId) -> EstimatorResult<()>;

    /// Measure in the computational basis.
    fn measure(&mut self, qubit: QubitId) -> EstimatorResult<MeasurementOutcome>;

    /// Reset to `|0⟩`.
    fn reset(&mut self, qubit: QubitId) -> EstimatorResult<()>;

    /// Pauli X.
    fn x(&mut self, qubit: QubitId) -> EstimatorResult<()> {
        self.rotation(Pauli::X, PI, qubit)
    }

    /// Pauli Y.
    fn y(&mut self, qubit: QubitId) -> EstimatorResult<()> {
        self.rotation(Pauli::Y, PI, qubit)
    }

    /// Pauli Z.
    fn z(&mut self, qubit: QubitId) -> EstimatorResult<()> {
        self.rotation(Pauli::Z, PI, qubit)
    }

    /// A logical operation with fully-qualified `name` started.
    fn operation_start(&mut self, _name: &str) {}

    /// Route one logical request to the matching contract method.
    ///
    /// Returns the outcome for measurements and `None` otherwise.
    fn apply(&mut self, request: &LogicalGateRequest) -> EstimatorResult<Option<MeasurementOutcome>> {
        match request {
            LogicalGateRequest::Rotation { axis, angle, qubit } => {
                self.rotation(*axis, *angle, *qubit)?
            }
            LogicalGateRequest::ControlledX { controls, target } => {
                self.controlled_x(controls, *target)?
            }
            LogicalGateRequest::X { qubit } => self.x(*qubit)?,
            LogicalGateRequest::Y { qubit } => self.y(*qubit)?,
            LogicalGateRequest::Z { qubit } => self.z(*qubit)?,
            LogicalGateRequest::H { qubit } => self.h(*qubit)?,
            LogicalGateRequest::Measure { qubit } => return self.measure(*qubit).map(Some),
            LogicalGateRequest::Allocate { qubits } => self.allocate(qubits)?,
            LogicalGateRequest::Release { qubits } => self.release(qubits)?,
            LogicalGateRequest::Reset { qubit } => self.reset(*qubit)?,
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the contract calls it receives.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<String>,
    }

    impl Backend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        fn allocate(&mut self, qubits: &[QubitId]) -> EstimatorResult<()> {
            self.calls.push(format!("allocate {}", qubits.len()));
            Ok(())
        }

        fn release(&mut self, qubits: &[QubitId]) -> EstimatorResult<()> {
            self.calls.push(format!("release {}", qubits.len()));
            Ok(())
        }

        fn rotation(&mut self, axis: Pauli, _angle: f64, qubit: QubitId) -> EstimatorResult<()> {
            self.calls.push(format!("r{axis} {qubit}"));
            Ok(())
        }

        fn controlled_x(&mut self, controls: &[QubitId], target: QubitId) -> EstimatorResult<()> {
            self.calls.push(format!("cx {} {target}", controls.len()));
            Ok(())
        }

        fn h(&mut self, qubit: QubitId) -> EstimatorResult<()> {
            self.calls.push(format!("h {qubit}"));
            Ok(())
        }

        fn measure(&mut self, qubit: QubitId) -> EstimatorResult<MeasurementOutcome> {
            self.calls.push(format!("m {qubit}"));
            Ok(MeasurementOutcome::One)
        }

        fn reset(&mut self, qubit: QubitId) -> EstimatorResult<()> {
            self.calls.push(format!("reset {qubit}"));
            Ok(())
        }
    }

    #[test]
    fn test_pauli_defaults_route_to_rotation() {
        let mut backend = RecordingBackend::default();
        backend.x(QubitId(0)).unwrap();
        backend.y(QubitId(1)).unwrap();
        backend.z(QubitId(2)).unwrap();
        assert_eq!(backend.calls, vec!["rX q0", "rY q1", "rZ q2"]);
    }

    #[test]
    fn test_apply_routes_requests() {
        let mut backend = RecordingBackend::default();
        let q = QubitId(0);
        let requests = [
            LogicalGateRequest::Allocate { qubits: vec![q] },
            LogicalGateRequest::H { qubit: q },
            LogicalGateRequest::ControlledX {
                controls: vec![q],
                target: QubitId(1),
            },
            LogicalGateRequest::Reset { qubit: q },
            LogicalGateRequest::Release { qubits: vec![q] },
        ];
        for request in &requests {
            assert_eq!(backend.apply(request).unwrap(), None);
        }
        assert_eq!(
            backend.calls,
            vec!["allocate 1", "h q0", "cx 1 q1", "reset q0", "release 1"]
        );
    }

    #[test]
    fn test_apply_returns_measurement() {
        let mut backend = RecordingBackend::default();
        let outcome = backend
            .apply(&LogicalGateRequest::Measure { qubit: QubitId(3) })
            .unwrap();
        assert_eq!(outcome, Some(MeasurementOutcome::One));
    }
}
