//! Logical and native gate vocabulary.
//!
//! Logical requests arrive from the execution engine; native gates are what
//! the platform actually executes and what the ledger is charged for.
//!
//! Native rotations follow the trapped-ion `R(θ, φ)` convention: the
//! rotation axis lies in the XY plane at phase `φ`, so `φ = 0` is an X
//! rotation and `φ = π/2` a Y rotation. The native entangling gate is the
//! Mølmer–Sørensen `XX(χ)`.

use std::f64::consts::FRAC_PI_2;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EstimatorError;
use crate::qubit::QubitId;

/// Phase of a native X rotation.
pub const PHI_X: f64 = 0.0;
/// Phase of a native Y rotation.
pub const PHI_Y: f64 = FRAC_PI_2;

/// Single-qubit Pauli axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl FromStr for Pauli {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("Pauli").unwrap_or(s) {
            "I" | "i" => Ok(Pauli::I),
            "X" | "x" => Ok(Pauli::X),
            "Y" | "y" => Ok(Pauli::Y),
            "Z" | "z" => Ok(Pauli::Z),
            _ => Err(EstimatorError::UnsupportedAxis(s.to_string())),
        }
    }
}

impl TryFrom<String> for Pauli {
    type Error = EstimatorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for Pauli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Kind of hardware-native instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NativeGateKind {
    /// Single-qubit rotation `R(θ, φ)`.
    #[serde(rename = "R")]
    Rotation,
    /// Two-qubit entangling gate `XX(χ)`.
    #[serde(rename = "XX")]
    Entangling,
}

impl NativeGateKind {
    /// All native kinds, in report order.
    pub const ALL: [NativeGateKind; 2] = [NativeGateKind::Rotation, NativeGateKind::Entangling];
}

impl std::fmt::Display for NativeGateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NativeGateKind::Rotation => write!(f, "R"),
            NativeGateKind::Entangling => write!(f, "XX"),
        }
    }
}

/// One emitted native instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NativeGate {
    /// `R(theta, phi)` on one qubit.
    Rotation { theta: f64, phi: f64, qubit: QubitId },
    /// `XX(chi)` between two qubits.
    Entangling {
        chi: f64,
        control: QubitId,
        target: QubitId,
    },
}

impl NativeGate {
    /// Native rotation about X.
    pub fn rx(theta: f64, qubit: QubitId) -> Self {
        NativeGate::Rotation {
            theta,
            phi: PHI_X,
            qubit,
        }
    }

    /// Native rotation about Y.
    pub fn ry(theta: f64, qubit: QubitId) -> Self {
        NativeGate::Rotation {
            theta,
            phi: PHI_Y,
            qubit,
        }
    }

    /// Native entangling gate.
    pub fn xx(chi: f64, control: QubitId, target: QubitId) -> Self {
        NativeGate::Entangling {
            chi,
            control,
            target,
        }
    }

    /// The kind this instruction is charged under.
    pub fn kind(&self) -> NativeGateKind {
        match self {
            NativeGate::Rotation { .. } => NativeGateKind::Rotation,
            NativeGate::Entangling { .. } => NativeGateKind::Entangling,
        }
    }
}

/// A logical operation issued by the execution engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LogicalGateRequest {
    Rotation {
        axis: Pauli,
        angle: f64,
        qubit: QubitId,
    },
    ControlledX {
        controls: Vec<QubitId>,
        target: QubitId,
    },
    X {
        qubit: QubitId,
    },
    Y {
        qubit: QubitId,
    },
    Z {
        qubit: QubitId,
    },
    H {
        qubit: QubitId,
    },
    Measure {
        qubit: QubitId,
    },
    Allocate {
        qubits: Vec<QubitId>,
    },
    Release {
        qubits: Vec<QubitId>,
    },
    Reset {
        qubit: QubitId,
    },
}

impl LogicalGateRequest {
    /// Contract-level name of the request.
    pub fn name(&self) -> &'static str {
        match self {
            LogicalGateRequest::Rotation { .. } => "rotation",
            LogicalGateRequest::ControlledX { .. } => "controlled_x",
            LogicalGateRequest::X { .. } => "x",
            LogicalGateRequest::Y { .. } => "y",
            LogicalGateRequest::Z { .. } => "z",
            LogicalGateRequest::H { .. } => "h",
            LogicalGateRequest::Measure { .. } => "measure",
            LogicalGateRequest::Allocate { .. } => "allocate",
            LogicalGateRequest::Release { .. } => "release",
            LogicalGateRequest::Reset { .. } => "reset",
        }
    }
}

/// One event in the engine's ordered stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A logical operation with the given fully-qualified name started.
    OperationStart { name: String },
    /// A gate or qubit-lifecycle request.
    Gate(LogicalGateRequest),
}

impl Event {
    /// Operation-start event.
    pub fn operation_start(name: impl Into<String>) -> Self {
        Event::OperationStart { name: name.into() }
    }
}

impl From<LogicalGateRequest> for Event {
    fn from(request: LogicalGateRequest) -> Self {
        Event::Gate(request)
    }
}
