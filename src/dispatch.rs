//! Synchronous event dispatch.
//!
//! A [`Dispatcher`] feeds the engine's ordered event stream into one
//! installed [`Backend`]. Operation-start events additionally go to an
//! explicit list of [`OperationListener`]s, called in registration order
//! after the backend's own hook. There is no global event bus; everything
//! happens inside [`Dispatcher::dispatch`] before it returns.
//!
//! [`Dispatcher::run`] consumes the dispatcher and hands the backend back
//! only if every event succeeded, so a failed run leaves nothing to report.

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::error::EstimatorResult;
use crate::gate::Event;
use crate::qubit::MeasurementOutcome;

/// Observer of operation-start events.
pub trait OperationListener {
    /// A logical operation with fully-qualified `name` started.
    fn on_operation_start(&mut self, name: &str);
}

/// Routes events to a backend and its listeners.
pub struct Dispatcher<'a, B> {
    backend: B,
    listeners: Vec<&'a mut dyn OperationListener>,
    processed: u64,
}

impl<'a, B: Backend> Dispatcher<'a, B> {
    /// Create a dispatcher around `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            listeners: Vec::new(),
            processed: 0,
        }
    }

    /// Register a listener. Listeners are called in registration order.
    pub fn with_listener(mut self, listener: &'a mut dyn OperationListener) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Installed backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of events processed successfully.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Process one event to completion.
    ///
    /// Returns the outcome for measurements and `None` otherwise.
    pub fn dispatch(&mut self, event: &Event) -> EstimatorResult<Option<MeasurementOutcome>> {
        let outcome = match event {
            Event::OperationStart { name } => {
                self.backend.operation_start(name);
                for listener in &mut self.listeners {
                    listener.on_operation_start(name);
                }
                None
            }
            Event::Gate(request) => self.backend.apply(request)?,
        };
        self.processed += 1;
        Ok(outcome)
    }

    /// Process a whole event stream and return the backend.
    ///
    /// Stops at the first error; the backend is dropped with it.
    pub fn run<I>(mut self, events: I) -> EstimatorResult<B>
    where
        I: IntoIterator<Item = Event>,
    {
        for event in events {
            if let Err(err) = self.dispatch(&event) {
                warn!(
                    backend = self.backend.name(),
                    event = self.processed,
                    error = %err,
                    "Aborting run"
                );
                return Err(err);
            }
        }
        debug!(
            backend = self.backend.name(),
            events = self.processed,
            "Run completed"
        );
        Ok(self.backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;
    use crate::estimator::ResourceEstimator;
    use crate::frequency::{DumpOrder, FrequencyTracker};
    use crate::gate::{LogicalGateRequest, NativeGateKind};
    use crate::platform::PlatformParameters;
    use crate::qubit::QubitId;

    /// Appends a tag to a shared log, to observe call order.
    struct TaggedListener<'l> {
        tag: &'static str,
        log: &'l std::cell::RefCell<Vec<String>>,
    }

    impl OperationListener for TaggedListener<'_> {
        fn on_operation_start(&mut self, name: &str) {
            self.log.borrow_mut().push(format!("{}:{name}", self.tag));
        }
    }

    fn bell_events() -> Vec<Event> {
        let (a, b) = (QubitId(0), QubitId(1));
        vec![
            Event::operation_start("Bell.Prepare"),
            LogicalGateRequest::Allocate { qubits: vec![a, b] }.into(),
            Event::operation_start("Intrinsic.H"),
            LogicalGateRequest::H { qubit: a }.into(),
            Event::operation_start("Intrinsic.CNOT"),
            LogicalGateRequest::ControlledX {
                controls: vec![a],
                target: b,
            }
            .into(),
            LogicalGateRequest::Measure { qubit: a }.into(),
            LogicalGateRequest::Measure { qubit: b }.into(),
            LogicalGateRequest::Release { qubits: vec![a, b] }.into(),
        ]
    }

    #[test]
    fn test_run_estimator_with_tracker() {
        let mut tracker = FrequencyTracker::new();
        let estimator = ResourceEstimator::new(PlatformParameters::ion_trap()).unwrap();
        let estimator = Dispatcher::new(estimator)
            .with_listener(&mut tracker)
            .run(bell_events())
            .unwrap();

        let snap = estimator.snapshot();
        assert_eq!(snap.total_qubits, 2);
        assert_eq!(snap.count(NativeGateKind::Rotation), 6);
        assert_eq!(snap.count(NativeGateKind::Entangling), 1);

        assert_eq!(
            tracker.table().entries(DumpOrder::FirstSeen),
            vec![("Bell.Prepare", 1), ("Intrinsic.H", 1), ("Intrinsic.CNOT", 1)]
        );
    }

    #[test]
    fn test_run_tracker_as_backend() {
        let tracker = Dispatcher::new(FrequencyTracker::new())
            .run(bell_events())
            .unwrap();
        assert_eq!(tracker.table().total(), 3);
    }

    #[test]
    fn test_listeners_called_in_order() {
        let log = std::cell::RefCell::new(Vec::new());
        let mut first = TaggedListener { tag: "first", log: &log };
        let mut second = TaggedListener { tag: "second", log: &log };

        let mut dispatcher = Dispatcher::new(FrequencyTracker::new())
            .with_listener(&mut first)
            .with_listener(&mut second);
        dispatcher.dispatch(&Event::operation_start("Op")).unwrap();
        assert_eq!(dispatcher.processed(), 1);
        assert_eq!(dispatcher.backend().table().get("Op"), 1);
        drop(dispatcher);

        assert_eq!(*log.borrow(), vec!["first:Op", "second:Op"]);
    }

    #[test]
    fn test_dispatch_returns_measurement() {
        let estimator = ResourceEstimator::new(PlatformParameters::ion_trap()).unwrap();
        let mut dispatcher = Dispatcher::new(estimator);
        dispatcher
            .dispatch(&LogicalGateRequest::Allocate { qubits: vec![QubitId(0)] }.into())
            .unwrap();
        let outcome = dispatcher
            .dispatch(&LogicalGateRequest::Measure { qubit: QubitId(0) }.into())
            .unwrap();
        assert_eq!(outcome, Some(MeasurementOutcome::Zero));
    }

    #[test]
    fn test_run_aborts_on_first_error() {
        let mut events = bell_events();
        events.insert(
            3,
            LogicalGateRequest::ControlledX {
                controls: vec![QubitId(0), QubitId(1)],
                target: QubitId(2),
            }
            .into(),
        );
        let estimator = ResourceEstimator::new(PlatformParameters::ion_trap()).unwrap();
        let err = Dispatcher::new(estimator).run(events).unwrap_err();
        assert!(matches!(
            err,
            EstimatorError::UnsupportedArity { controls: 2, .. }
        ));
    }
}
