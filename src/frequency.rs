//! Operation frequency tracking.
//!
//! A coarse-grained profiler: it only sees operation-start events carrying
//! the fully-qualified name of the logical operation, and counts them. It
//! never decomposes or evaluates gates.
//!
//! One table serves both dump orders. Entries are kept in first-seen order
//! and sorted on demand for a lexicographic dump.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::backend::Backend;
use crate::dispatch::OperationListener;
use crate::error::EstimatorResult;
use crate::gate::Pauli;
use crate::qubit::{MeasurementOutcome, QubitId};

/// Order in which a frequency table is dumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpOrder {
    /// Order in which each name was first seen.
    #[default]
    FirstSeen,
    /// Byte-wise lexicographic order of names.
    Lexicographic,
}

/// Invocation counts keyed by fully-qualified operation name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationFrequencyTable {
    counts: IndexMap<String, u64, FxBuildHasher>,
}

impl OperationFrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one invocation of `name`, inserting it with count 1 if absent.
    pub fn record(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(name.to_owned(), 1);
            }
        }
    }

    /// Count for `name`, zero if never seen.
    pub fn get(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Entries in the requested order.
    pub fn entries(&self, order: DumpOrder) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        if order == DumpOrder::Lexicographic {
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        }
        entries
    }

    /// One `name: count` line per entry, in the requested order.
    pub fn render(&self, order: DumpOrder) -> String {
        self.entries(order)
            .into_iter()
            .map(|(name, count)| format!("{name}: {count}\n"))
            .collect()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct operations.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no operation was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for OperationFrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = Self::new();
        for name in iter {
            table.record(name);
        }
        table
    }
}

/// Backend that only counts operation starts.
///
/// Gate and lifecycle events are accepted without inspection, and
/// measurements report [`MeasurementOutcome::Zero`]. It can also ride along
/// another backend as an [`OperationListener`].
#[derive(Debug, Clone, Default)]
pub struct FrequencyTracker {
    table: OperationFrequencyTable,
}

impl FrequencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts collected so far.
    pub fn table(&self) -> &OperationFrequencyTable {
        &self.table
    }

    /// Consume the tracker and return its table.
    pub fn into_table(self) -> OperationFrequencyTable {
        self.table
    }
}

impl OperationListener for FrequencyTracker {
    fn on_operation_start(&mut self, name: &str) {
        trace!(operation = name, "Operation started");
        self.table.record(name);
    }
}

impl Backend for FrequencyTracker {
    fn name(&self) -> &str {
        "frequency-tracker"
    }

    fn allocate(&mut self, _qubits: &[QubitId]) -> EstimatorResult<()> {
        Ok(())
    }

    fn release(&mut self, _qubits: &[QubitId]) -> EstimatorResult<()> {
        Ok(())
    }

    fn rotation(&mut self, _axis: Pauli, _angle: f64, _qubit: QubitId) -> EstimatorResult<()> {
        Ok(())
    }

    fn controlled_x(&mut self, _controls: &[QubitId], _target: QubitId) -> EstimatorResult<()> {
        Ok(())
    }

    fn h(&mut self, _qubit: QubitId) -> EstimatorResult<()> {
        Ok(())
    }

    fn measure(&mut self, _qubit: QubitId) -> EstimatorResult<MeasurementOutcome> {
        Ok(MeasurementOutcome::Zero)
    }

    fn reset(&mut self, _qubit: QubitId) -> EstimatorResult<()> {
        Ok(())
    }

    fn operation_start(&mut self, name: &str) {
        self.on_operation_start(name);
    }
}
