//! Platform cost parameters.
//!
//! A [`PlatformParameters`] value describes what one native instruction
//! costs on a target device: the base fidelity and characteristic duration
//! of the rotation and entangling gates, plus the sign/scale constants used
//! by the decomposition table. It is fixed at backend construction and never
//! changes during a run.
//!
//! All fidelity values are in `[0.0, 1.0]` where `1.0` means perfect.
//! Time values are in **microseconds**.
//!
//! Parameters can come from a preset, from builder overrides, or from a JSON
//! document:
//!
//! ```json
//! {
//!   "name": "ion-trap",
//!   "rotation_fidelity": 0.99,
//!   "rotation_time": 20.0,
//!   "entangling_fidelity": 0.96,
//!   "entangling_time": 235.0,
//!   "decomposition": { "v": 1.0, "s": 1.0 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::{EntanglingModel, GateCost, RotationModel};
use crate::error::{EstimatorError, EstimatorResult};
use crate::gate::NativeGate;

/// Cost parameters of a target platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformParameters {
    /// Name of the platform.
    pub name: String,
    /// Base fidelity of a single-qubit rotation.
    pub rotation_fidelity: f64,
    /// Duration of a π rotation (microseconds).
    pub rotation_time: f64,
    /// Base fidelity of the two-qubit entangling gate.
    pub entangling_fidelity: f64,
    /// Duration of the entangling gate (microseconds).
    pub entangling_time: f64,
    /// Constants of the decomposition table.
    #[serde(default)]
    pub decomposition: DecompositionConstants,
}

impl PlatformParameters {
    /// Create parameters, rejecting values no device can have.
    pub fn new(
        name: impl Into<String>,
        rotation_fidelity: f64,
        rotation_time: f64,
        entangling_fidelity: f64,
        entangling_time: f64,
    ) -> EstimatorResult<Self> {
        let params = Self {
            name: name.into(),
            rotation_fidelity,
            rotation_time,
            entangling_fidelity,
            entangling_time,
            decomposition: DecompositionConstants::default(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Trapped-ion reference platform.
    ///
    /// R gate: 99% fidelity, 20 µs per π rotation.
    /// XX gate: 96% fidelity, 235 µs.
    pub fn ion_trap() -> Self {
        Self {
            name: "ion-trap".into(),
            rotation_fidelity: 0.99,
            rotation_time: 20.0,
            entangling_fidelity: 0.96,
            entangling_time: 235.0,
            decomposition: DecompositionConstants::default(),
        }
    }

    /// Error-free platform with the ion-trap timings. Useful to isolate the
    /// time dimension of an estimate.
    pub fn ideal() -> Self {
        Self {
            name: "ideal".into(),
            rotation_fidelity: 1.0,
            entangling_fidelity: 1.0,
            ..Self::ion_trap()
        }
    }

    /// Parse parameters from a JSON document and validate them.
    pub fn from_json(json: &str) -> EstimatorResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a JSON file and validate them.
    pub fn load(path: &Path) -> EstimatorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let params = Self::from_json(&content)?;
        debug!(platform = %params.name, path = %path.display(), "Loaded platform parameters");
        Ok(params)
    }

    /// Override the rotation gate characteristics.
    pub fn with_rotation(mut self, fidelity: f64, time: f64) -> Self {
        self.rotation_fidelity = fidelity;
        self.rotation_time = time;
        self
    }

    /// Override the entangling gate characteristics.
    pub fn with_entangling(mut self, fidelity: f64, time: f64) -> Self {
        self.entangling_fidelity = fidelity;
        self.entangling_time = time;
        self
    }

    /// Override the decomposition constants.
    pub fn with_decomposition(mut self, decomposition: DecompositionConstants) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Validate parameters.
    pub fn validate(&self) -> EstimatorResult<()> {
        check_fidelity("rotation_fidelity", self.rotation_fidelity)?;
        check_fidelity("entangling_fidelity", self.entangling_fidelity)?;
        check_time("rotation_time", self.rotation_time)?;
        check_time("entangling_time", self.entangling_time)?;
        self.decomposition.validate()
    }

    /// Cost model of the native rotation.
    pub fn rotation_model(&self) -> RotationModel {
        RotationModel::new(self.rotation_fidelity, self.rotation_time)
    }

    /// Cost model of the native entangling gate.
    pub fn entangling_model(&self) -> EntanglingModel {
        EntanglingModel::new(self.entangling_fidelity, self.entangling_time)
    }

    /// Cost of one native instruction on this platform.
    pub fn cost(&self, gate: &NativeGate) -> GateCost {
        match *gate {
            NativeGate::Rotation { theta, phi, .. } => self.rotation_model().cost(theta, phi),
            NativeGate::Entangling { chi, .. } => self.entangling_model().cost(chi),
        }
    }
}

impl Default for PlatformParameters {
    fn default() -> Self {
        Self::ion_trap()
    }
}

/// Sign/scale constants of the decomposition table.
///
/// `v` scales the Y-basis change around entangling gates and Z rotations;
/// `s` is the sign of the entangling interaction. Both are `1` on the
/// reference ion-trap platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecompositionConstants {
    pub v: f64,
    pub s: f64,
}

impl DecompositionConstants {
    pub fn new(v: f64, s: f64) -> Self {
        Self { v, s }
    }

    /// Validate constants.
    pub fn validate(&self) -> EstimatorResult<()> {
        for (field, value) in [("v", self.v), ("s", self.s)] {
            if !value.is_finite() || value == 0.0 {
                return Err(EstimatorError::Configuration(format!(
                    "decomposition constant {field} must be finite and non-zero, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for DecompositionConstants {
    fn default() -> Self {
        Self { v: 1.0, s: 1.0 }
    }
}

fn check_fidelity(field: &str, value: f64) -> EstimatorResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EstimatorError::Configuration(format!(
            "{field} must be in [0, 1], got {value}"
        )))
    }
}

fn check_time(field: &str, value: f64) -> EstimatorResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EstimatorError::Configuration(format!(
            "{field} must be a non-negative duration, got {value}"
        )))
    }
}
