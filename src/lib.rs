//! Native Gate Resource Estimation for Quantum Programs
//!
//! This crate estimates what a quantum algorithm costs on a target hardware
//! platform (native gate counts, cumulative infidelity and cumulative
//! execution time) without evolving any quantum state. It plugs into an
//! execution engine as a [`Backend`]: the engine drives the algorithm and
//! issues gate and qubit-lifecycle events; the backend lowers each logical
//! gate to native instructions and charges them to a ledger.
//!
//! # Overview
//!
//! The crate defines:
//! - A [`Backend`] trait: the capability contract the engine drives
//! - [`ResourceEstimator`]: lowers gates and accumulates a [`ResourceLedger`]
//! - [`FrequencyTracker`]: counts operation starts into an [`OperationFrequencyTable`]
//! - [`GateLowering`] / [`IonTrapLowering`]: pluggable decomposition tables
//! - [`PlatformParameters`]: fidelity and timing of the native gates
//! - [`RotationModel`] / [`EntanglingModel`]: pure native gate cost models
//! - [`Dispatcher`] / [`OperationListener`]: ordered, synchronous event routing
//! - [`EstimatorError`] with the usage and configuration failure taxonomy
//!
//! # Data flow
//!
//! ```text
//!   engine ──→ Dispatcher ──→ Backend ──→ GateLowering ──→ cost model ──→ ResourceLedger
//!                  │                                                           │
//!                  └──→ OperationListener(s)                           LedgerSnapshot
//! ```
//!
//! # Example
//!
//! ```
//! use resource_estimator::{
//!     Backend, NativeGateKind, PlatformParameters, QubitId, ResourceEstimator,
//! };
//!
//! let mut estimator = ResourceEstimator::new(PlatformParameters::ion_trap())?;
//! let (a, b) = (QubitId(0), QubitId(1));
//! estimator.allocate(&[a, b])?;
//! estimator.h(a)?;
//! estimator.controlled_x(&[a], b)?;
//!
//! let report = estimator.snapshot();
//! assert_eq!(report.total_qubits, 2);
//! assert_eq!(report.count(NativeGateKind::Rotation), 6);
//! assert_eq!(report.count(NativeGateKind::Entangling), 1);
//! # Ok::<(), resource_estimator::EstimatorError>(())
//! ```

pub mod backend;
pub mod cost;
pub mod dispatch;
pub mod error;
pub mod estimator;
pub mod frequency;
pub mod gate;
pub mod ledger;
pub mod lowering;
pub mod platform;
pub mod qubit;

pub use backend::Backend;
pub use cost::{EntanglingModel, GateCost, RotationModel};
pub use dispatch::{Dispatcher, OperationListener};
pub use error::{EstimatorError, EstimatorResult};
pub use estimator::ResourceEstimator;
pub use frequency::{DumpOrder, FrequencyTracker, OperationFrequencyTable};
pub use gate::{Event, LogicalGateRequest, NativeGate, NativeGateKind, Pauli};
pub use ledger::{LedgerEntry, LedgerSnapshot, ResourceLedger};
pub use lowering::{GateLowering, IonTrapLowering};
pub use platform::{DecompositionConstants, PlatformParameters};
pub use qubit::{MeasurementOutcome, QubitId, QubitRegistry};
