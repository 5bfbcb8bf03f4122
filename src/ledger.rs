//! Resource ledger.
//!
//! The ledger is a pure accumulator: every native instruction adds one to
//! the count of its kind and adds its error and time to the running totals.
//! Nothing is ever subtracted, so every field is monotonically
//! non-decreasing for the lifetime of one backend instance, and the final
//! state depends only on the multiset of charges, not on their order.
//!
//! Qubit accounting counts every qubit ever allocated during the run.
//! Releases do not decrement it: the report is about total qubits consumed,
//! not instantaneous circuit width.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cost::GateCost;
use crate::gate::NativeGateKind;

/// Accumulated charges for one native gate kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Number of instructions charged.
    pub count: u64,
    /// Sum of error contributions.
    pub error: f64,
    /// Sum of durations (microseconds).
    pub time: f64,
}

/// Mutable accumulator of native gate charges and qubit allocations.
#[derive(Debug, Clone)]
pub struct ResourceLedger {
    entries: BTreeMap<NativeGateKind, LedgerEntry>,
    total_qubits: u64,
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLedger {
    /// Create a ledger with a zero entry for every native kind.
    pub fn new() -> Self {
        let entries = NativeGateKind::ALL
            .into_iter()
            .map(|kind| (kind, LedgerEntry::default()))
            .collect();
        Self {
            entries,
            total_qubits: 0,
        }
    }

    /// Charge one instruction of `kind`.
    pub fn accumulate(&mut self, kind: NativeGateKind, error: f64, time: f64) {
        debug_assert!(error >= 0.0 && time >= 0.0, "ledger charges must be non-negative");
        let entry = self.entries.entry(kind).or_default();
        entry.count += 1;
        entry.error += error;
        entry.time += time;
    }

    /// Charge one instruction of `kind` with a precomputed cost.
    pub fn charge(&mut self, kind: NativeGateKind, cost: GateCost) {
        self.accumulate(kind, cost.error, cost.time);
    }

    /// Record a batch of `n` newly allocated qubits.
    pub fn record_allocation(&mut self, n: u64) {
        self.total_qubits += n;
    }

    /// Accumulated entry for one kind.
    pub fn entry(&self, kind: NativeGateKind) -> LedgerEntry {
        self.entries.get(&kind).copied().unwrap_or_default()
    }

    /// Total qubits allocated so far.
    pub fn total_qubits(&self) -> u64 {
        self.total_qubits
    }

    /// Read-only summary of the ledger. Does not reset anything.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let values = || self.entries.values();
        LedgerSnapshot {
            total_qubits: self.total_qubits,
            total_gate_count: values().map(|e| e.count).sum(),
            total_error: values().map(|e| e.error).sum(),
            total_time: values().map(|e| e.time).sum(),
            gates: self.entries.clone(),
        }
    }
}

/// Point-in-time view of a [`ResourceLedger`], handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Qubits allocated over the whole run.
    pub total_qubits: u64,
    /// Native instructions over all kinds.
    pub total_gate_count: u64,
    /// Error summed over all kinds.
    pub total_error: f64,
    /// Time summed over all kinds (microseconds).
    pub total_time: f64,
    /// Per-kind breakdown.
    pub gates: BTreeMap<NativeGateKind, LedgerEntry>,
}

impl LedgerSnapshot {
    /// Per-kind entry, zero if the kind was never charged.
    pub fn gate(&self, kind: NativeGateKind) -> LedgerEntry {
        self.gates.get(&kind).copied().unwrap_or_default()
    }

    /// Number of instructions of one kind.
    pub fn count(&self, kind: NativeGateKind) -> u64 {
        self.gate(kind).count
    }
}
