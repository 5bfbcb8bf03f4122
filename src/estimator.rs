//! Resource estimation backend.
//!
//! [`ResourceEstimator`] implements the [`Backend`] contract without
//! evolving any quantum state. Each logical request is checked, lowered to
//! native instructions by a [`GateLowering`] table, priced by the
//! platform's cost models, and charged to a [`ResourceLedger`].
//!
//! ```text
//!   request ──→ validate ──→ lower ──→ cost ──→ ledger
//!              (arity,      (pure)    (pure)   (mutates)
//!               liveness)
//! ```
//!
//! Validation and lowering both happen before the ledger is touched, so a
//! rejected request is a no-op with respect to the ledger.

use tracing::{debug, info, trace};

use crate::backend::Backend;
use crate::error::{EstimatorError, EstimatorResult};
use crate::gate::{NativeGate, Pauli};
use crate::ledger::{LedgerSnapshot, ResourceLedger};
use crate::lowering::{GateLowering, IonTrapLowering};
use crate::platform::PlatformParameters;
use crate::qubit::{MeasurementOutcome, QubitId, QubitRegistry};

/// Gate-lowering, cost-accumulating backend.
#[derive(Debug, Clone)]
pub struct ResourceEstimator<L = IonTrapLowering> {
    platform: PlatformParameters,
    lowering: L,
    ledger: ResourceLedger,
    qubits: QubitRegistry,
}

impl ResourceEstimator<IonTrapLowering> {
    /// Create an estimator using the trapped-ion decomposition with the
    /// platform's own decomposition constants.
    pub fn new(platform: PlatformParameters) -> EstimatorResult<Self> {
        let lowering = IonTrapLowering::from(platform.decomposition);
        Self::with_lowering(platform, lowering)
    }
}

impl<L: GateLowering> ResourceEstimator<L> {
    /// Create an estimator with a custom decomposition table.
    pub fn with_lowering(platform: PlatformParameters, lowering: L) -> EstimatorResult<Self> {
        platform.validate()?;
        info!(
            platform = %platform.name,
            rotation_fidelity = platform.rotation_fidelity,
            entangling_fidelity = platform.entangling_fidelity,
            "Created resource estimator"
        );
        Ok(Self {
            platform,
            lowering,
            ledger: ResourceLedger::new(),
            qubits: QubitRegistry::new(),
        })
    }

    /// Platform this estimator charges against.
    pub fn platform(&self) -> &PlatformParameters {
        &self.platform
    }

    /// Decomposition table in use.
    pub fn lowering(&self) -> &L {
        &self.lowering
    }

    /// Live view of the ledger.
    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Snapshot of the ledger.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    /// Consume the estimator and return its final snapshot.
    pub fn into_snapshot(self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    fn pauli(&mut self, operation: &'static str, axis: Pauli, qubit: QubitId) -> EstimatorResult<()> {
        self.qubits.check(operation, qubit)?;
        let gates = self.lowering.pauli(axis, qubit);
        self.charge(&gates);
        Ok(())
    }

    fn charge(&mut self, gates: &[NativeGate]) {
        for gate in gates {
            let cost = self.platform.cost(gate);
            trace!(kind = %gate.kind(), error = cost.error, time = cost.time, "Charged native gate");
            self.ledger.charge(gate.kind(), cost);
        }
    }
}

impl<L: GateLowering> Backend for ResourceEstimator<L> {
    fn name(&self) -> &str {
        "resource-estimator"
    }

    fn allocate(&mut self, qubits: &[QubitId]) -> EstimatorResult<()> {
        self.qubits.allocate(qubits)?;
        self.ledger.record_allocation(qubits.len() as u64);
        debug!(
            allocated = qubits.len(),
            live = self.qubits.len(),
            total = self.ledger.total_qubits(),
            "Allocated qubits"
        );
        Ok(())
    }

    fn release(&mut self, qubits: &[QubitId]) -> EstimatorResult<()> {
        self.qubits.release(qubits)?;
        debug!(released = qubits.len(), live = self.qubits.len(), "Released qubits");
        Ok(())
    }

    fn rotation(&mut self, axis: Pauli, angle: f64, qubit: QubitId) -> EstimatorResult<()> {
        self.qubits.check("rotation", qubit)?;
        if !angle.is_finite() {
            return Err(EstimatorError::InvalidAngle {
                operation: "rotation",
                angle,
            });
        }
        let gates = self.lowering.rotation(axis, angle, qubit);
        self.charge(&gates);
        Ok(())
    }

    fn controlled_x(&mut self, controls: &[QubitId], target: QubitId) -> EstimatorResult<()> {
        let &[control] = controls else {
            return Err(EstimatorError::UnsupportedArity {
                operation: "controlled_x",
                controls: controls.len(),
            });
        };
        if control == target {
            return Err(EstimatorError::IllegalQubitUse {
                operation: "controlled_x",
                qubit: target,
                reason: "control and target are the same qubit",
            });
        }
        self.qubits.check("controlled_x", control)?;
        self.qubits.check("controlled_x", target)?;
        let gates = self.lowering.controlled_x(control, target);
        self.charge(&gates);
        Ok(())
    }

    fn h(&mut self, qubit: QubitId) -> EstimatorResult<()> {
        self.qubits.check("h", qubit)?;
        let gates = self.lowering.hadamard(qubit);
        self.charge(&gates);
        Ok(())
    }

    fn x(&mut self, qubit: QubitId) -> EstimatorResult<()> {
        self.pauli("x", Pauli::X, qubit)
    }

    fn y(&mut self, qubit: QubitId) -> EstimatorResult<()> {
        self.pauli("y", Pauli::Y, qubit)
    }

    fn z(&mut self, qubit: QubitId) -> EstimatorResult<()> {
        self.pauli("z", Pauli::Z, qubit)
    }

    // Cost accounting only: no state is evolved, so the outcome is fixed.
    fn measure(&mut self, qubit: QubitId) -> EstimatorResult<MeasurementOutcome> {
        self.qubits.check("measure", qubit)?;
        Ok(MeasurementOutcome::Zero)
    }

    fn reset(&mut self, qubit: QubitId) -> EstimatorResult<()> {
        self.qubits.check("reset", qubit)
    }
}
