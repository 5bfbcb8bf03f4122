//! Native gate cost models.
//!
//! Each model is a pure function of the instruction parameters and the
//! platform's fixed fidelity and characteristic time. Times are in
//! microseconds; errors are dimensionless infidelity contributions.

use std::f64::consts::PI;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Incremental error and time charged for one native instruction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GateCost {
    /// Infidelity contribution (dimensionless).
    pub error: f64,
    /// Duration (microseconds).
    pub time: f64,
}

impl GateCost {
    pub fn new(error: f64, time: f64) -> Self {
        Self { error, time }
    }
}

impl Add for GateCost {
    type Output = GateCost;

    fn add(self, rhs: GateCost) -> GateCost {
        GateCost {
            error: self.error + rhs.error,
            time: self.time + rhs.time,
        }
    }
}

impl AddAssign for GateCost {
    fn add_assign(&mut self, rhs: GateCost) {
        self.error += rhs.error;
        self.time += rhs.time;
    }
}

/// Cost model for the single-qubit rotation `R(θ, φ)`.
///
/// The error term vanishes at `θ = 0` and `θ = π` and peaks at `π/2`. The
/// duration scales linearly with `|θ|`, with `time` being the duration of a
/// full π rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationModel {
    /// Base fidelity of the rotation, in `[0.0, 1.0]`.
    pub fidelity: f64,
    /// Duration of a π rotation (microseconds).
    pub time: f64,
}

impl RotationModel {
    pub fn new(fidelity: f64, time: f64) -> Self {
        Self { fidelity, time }
    }

    /// Cost of `R(theta, phi)`. The phase does not affect the cost.
    pub fn cost(&self, theta: f64, _phi: f64) -> GateCost {
        GateCost {
            error: theta.sin().abs() * (1.0 - self.fidelity),
            time: theta.abs() / PI * self.time,
        }
    }
}

/// Cost model for the two-qubit entangling gate `XX(χ)`.
///
/// The duration is fixed by hardware regardless of the requested phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntanglingModel {
    /// Base fidelity of the entangling gate, in `[0.0, 1.0]`.
    pub fidelity: f64,
    /// Duration of one entangling gate (microseconds).
    pub time: f64,
}

impl EntanglingModel {
    pub fn new(fidelity: f64, time: f64) -> Self {
        Self { fidelity, time }
    }

    /// Cost of `XX(chi)`.
    pub fn cost(&self, chi: f64) -> GateCost {
        GateCost {
            error: (2.0 * chi).sin().abs() * (1.0 - self.fidelity),
            time: self.time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f64 = 1e-12;

    #[test]
    fn test_rotation_cost_zero_angle() {
        for (fidelity, time) in [(0.99, 20.0), (0.5, 3.0), (1.0, 0.0)] {
            let cost = RotationModel::new(fidelity, time).cost(0.0, 0.0);
            assert_eq!(cost, GateCost::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_rotation_cost_pi() {
        let model = RotationModel::new(0.99, 20.0);
        let cost = model.cost(PI, 0.0);
        assert!(cost.error.abs() < EPS);
        assert!((cost.time - 20.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_cost_peaks_at_half_pi() {
        let model = RotationModel::new(0.99, 20.0);
        let cost = model.cost(FRAC_PI_2, FRAC_PI_2);
        assert!((cost.error - 0.01).abs() < EPS);
        assert!((cost.time - 10.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_cost_negative_angle() {
        let model = RotationModel::new(0.9, 8.0);
        let pos = model.cost(FRAC_PI_2, 0.0);
        let neg = model.cost(-FRAC_PI_2, 0.0);
        assert!((pos.error - neg.error).abs() < EPS);
        assert!((pos.time - neg.time).abs() < EPS);
        assert!(neg.error >= 0.0 && neg.time >= 0.0);
    }

    #[test]
    fn test_entangling_time_is_constant() {
        let model = EntanglingModel::new(0.96, 235.0);
        for chi in [0.0, 0.1, FRAC_PI_4, 1.0, PI, -2.5] {
            assert_eq!(model.cost(chi).time, 235.0);
        }
    }

    #[test]
    fn test_entangling_error() {
        let model = EntanglingModel::new(0.96, 235.0);
        assert_eq!(model.cost(0.0).error, 0.0);
        assert!((model.cost(FRAC_PI_4).error - 0.04).abs() < EPS);
        for i in 0..=20 {
            let chi = FRAC_PI_2 * f64::from(i) / 20.0;
            assert!(model.cost(chi).error <= model.cost(FRAC_PI_4).error + EPS);
        }
    }

    #[test]
    fn test_gate_cost_add() {
        let mut total = GateCost::default();
        total += GateCost::new(0.25, 1.0);
        let total = total + GateCost::new(0.5, 2.0);
        assert_eq!(total, GateCost::new(0.75, 3.0));
    }
}
