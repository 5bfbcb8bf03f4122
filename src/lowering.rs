//! Decomposition of logical gates into native instructions.
//!
//! A [`GateLowering`] is a platform-specific rewrite table. It is pure: it
//! never touches a ledger or checks qubit liveness, it only returns the
//! native sequence a logical gate expands to. The estimator validates the
//! request, lowers it in full, and only then charges the ledger, so a
//! rejected request never leaves a partial charge behind.
//!
//! Reference table ([`IonTrapLowering`]):
//!
//! | Logical | Native sequence |
//! |---------|-----------------|
//! | `H(q)` | `R_X(π)`, `R_Y(−π/2)` |
//! | `X/Y/Z(q)` | `Rotation(X/Y/Z, π)` |
//! | `Rotation(X/Y, θ)` | `R_X(θ)` / `R_Y(θ)` |
//! | `Rotation(Z, θ)` | `R_Y(v·π)`, `R_X(v·θ)`, `R_Y(−v·π)` |
//! | `Rotation(I, θ)` | — |
//! | `CNOT(c, t)` | `R_Y(v·π/2, c)`, `XX(s·π/4, c, t)`, `R_X(−s·π/2, c)`, `R_X(−v·s·π/2, t)`, `R_Y(−v·π/2, c)` |

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::gate::{NativeGate, Pauli};
use crate::platform::DecompositionConstants;
use crate::qubit::QubitId;

/// Rewrite table from logical gates to native instructions.
pub trait GateLowering {
    /// Lower a rotation about a Pauli axis.
    fn rotation(&self, axis: Pauli, angle: f64, qubit: QubitId) -> Vec<NativeGate>;

    /// Lower a singly-controlled X.
    fn controlled_x(&self, control: QubitId, target: QubitId) -> Vec<NativeGate>;

    /// Lower a Hadamard.
    fn hadamard(&self, qubit: QubitId) -> Vec<NativeGate> {
        let mut gates = self.rotation(Pauli::X, PI, qubit);
        gates.extend(self.rotation(Pauli::Y, -FRAC_PI_2, qubit));
        gates
    }

    /// Lower a Pauli gate as a π rotation about its axis.
    fn pauli(&self, axis: Pauli, qubit: QubitId) -> Vec<NativeGate> {
        self.rotation(axis, PI, qubit)
    }
}

/// Trapped-ion decomposition into `R(θ, φ)` and `XX(χ)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IonTrapLowering {
    constants: DecompositionConstants,
}

impl IonTrapLowering {
    pub fn new(constants: DecompositionConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> DecompositionConstants {
        self.constants
    }
}

impl From<DecompositionConstants> for IonTrapLowering {
    fn from(constants: DecompositionConstants) -> Self {
        Self::new(constants)
    }
}

impl GateLowering for IonTrapLowering {
    fn rotation(&self, axis: Pauli, angle: f64, qubit: QubitId) -> Vec<NativeGate> {
        let v = self.constants.v;
        match axis {
            Pauli::I => vec![],
            Pauli::X => vec![NativeGate::rx(angle, qubit)],
            Pauli::Y => vec![NativeGate::ry(angle, qubit)],
            // No native Z rotation: conjugate an X rotation by Y π-pulses.
            Pauli::Z => vec![
                NativeGate::ry(v * PI, qubit),
                NativeGate::rx(v * angle, qubit),
                NativeGate::ry(-v * PI, qubit),
            ],
        }
    }

    fn controlled_x(&self, control: QubitId, target: QubitId) -> Vec<NativeGate> {
        let DecompositionConstants { v, s } = self.constants;
        vec![
            NativeGate::ry(v * FRAC_PI_2, control),
            NativeGate::xx(s * FRAC_PI_4, control, target),
            NativeGate::rx(-s * FRAC_PI_2, control),
            NativeGate::rx(-v * s * FRAC_PI_2, target),
            NativeGate::ry(-v * FRAC_PI_2, control),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{NativeGateKind, PHI_X, PHI_Y};

    const EPS: f64 = 1e-12;

    fn assert_rotation(gate: &NativeGate, theta: f64, phi: f64, qubit: QubitId) {
        match *gate {
            NativeGate::Rotation {
                theta: t,
                phi: p,
                qubit: q,
            } => {
                assert!((t - theta).abs() < EPS, "theta {t} != {theta}");
                assert!((p - phi).abs() < EPS, "phi {p} != {phi}");
                assert_eq!(q, qubit);
            }
            other => panic!("expected rotation, got {other:?}"),
        }
    }

    #[test]
    fn test_hadamard_sequence() {
        let q = QubitId(0);
        let gates = IonTrapLowering::default().hadamard(q);
        assert_eq!(gates.len(), 2);
        assert_rotation(&gates[0], PI, PHI_X, q);
        assert_rotation(&gates[1], -FRAC_PI_2, PHI_Y, q);
    }

    #[test]
    fn test_pauli_sequences() {
        let q = QubitId(1);
        let lowering = IonTrapLowering::default();
        let x = lowering.pauli(Pauli::X, q);
        assert_eq!(x.len(), 1);
        assert_rotation(&x[0], PI, PHI_X, q);

        let y = lowering.pauli(Pauli::Y, q);
        assert_rotation(&y[0], PI, PHI_Y, q);

        // Z goes through the Y-conjugated X rotation.
        let z = lowering.pauli(Pauli::Z, q);
        assert_eq!(z.len(), 3);
        assert_rotation(&z[1], PI, PHI_X, q);
    }

    #[test]
    fn test_z_rotation_sequence() {
        let q = QubitId(2);
        let gates = IonTrapLowering::default().rotation(Pauli::Z, 0.3, q);
        assert_rotation(&gates[0], PI, PHI_Y, q);
        assert_rotation(&gates[1], 0.3, PHI_X, q);
        assert_rotation(&gates[2], -PI, PHI_Y, q);
    }

    #[test]
    fn test_identity_rotation_is_empty() {
        assert!(
            IonTrapLowering::default()
                .rotation(Pauli::I, 1.0, QubitId(0))
                .is_empty()
        );
    }

    #[test]
    fn test_controlled_x_sequence() {
        let (c, t) = (QubitId(0), QubitId(1));
        let gates = IonTrapLowering::default().controlled_x(c, t);
        let kinds: Vec<_> = gates.iter().map(NativeGate::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NativeGateKind::Rotation,
                NativeGateKind::Entangling,
                NativeGateKind::Rotation,
                NativeGateKind::Rotation,
                NativeGateKind::Rotation,
            ]
        );
        assert_rotation(&gates[0], FRAC_PI_2, PHI_Y, c);
        assert_eq!(gates[1], NativeGate::xx(FRAC_PI_4, c, t));
        assert_rotation(&gates[2], -FRAC_PI_2, PHI_X, c);
        assert_rotation(&gates[3], -FRAC_PI_2, PHI_X, t);
        assert_rotation(&gates[4], -FRAC_PI_2, PHI_Y, c);
    }

    #[test]
    fn test_constants_are_threaded_through() {
        let (c, t) = (QubitId(0), QubitId(1));
        let lowering = IonTrapLowering::new(DecompositionConstants::new(-1.0, 1.0));
        let gates = lowering.controlled_x(c, t);
        assert_rotation(&gates[0], -FRAC_PI_2, PHI_Y, c);
        assert_rotation(&gates[3], FRAC_PI_2, PHI_X, t);

        let z = lowering.rotation(Pauli::Z, 0.5, c);
        assert_rotation(&z[0], -PI, PHI_Y, c);
        assert_rotation(&z[1], -0.5, PHI_X, c);
        assert_rotation(&z[2], PI, PHI_Y, c);
    }
}
