//! Ion platform resource estimation driver.
//!
//! Runs an event stream through the resource estimator, with a frequency
//! tracker listening for operation starts, and prints the physical-layer
//! statistics and the operation table.
//!
//! ```bash
//! # Built-in Bernstein–Vazirani run with secret 1011
//! ion-driver-demo
//!
//! # Replay a recorded trace on a custom platform
//! ion-driver-demo --trace traces/bell.json --platform platform.json
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use resource_estimator::{
    Dispatcher, DumpOrder, EstimatorError, EstimatorResult, Event, FrequencyTracker,
    LedgerSnapshot, LogicalGateRequest, PlatformParameters, QubitId, ResourceEstimator,
};

/// Ion platform resource estimation
#[derive(Parser)]
#[command(name = "ion-driver-demo")]
#[command(about = "Estimate native gate resources on a trapped-ion platform")]
struct Cli {
    /// Platform parameters (JSON). Defaults to the ion-trap preset.
    #[arg(short, long)]
    platform: Option<PathBuf>,

    /// Recorded event trace (JSON array) to replay instead of the built-in run.
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Secret bit string for the built-in Bernstein–Vazirani run.
    #[arg(long, default_value = "1011")]
    secret: String,

    /// Order of the operation table.
    #[arg(long, value_enum, default_value_t = Order::FirstSeen)]
    order: Order,

    /// Print the ledger snapshot as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    FirstSeen,
    Lexicographic,
}

impl From<Order> for DumpOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::FirstSeen => DumpOrder::FirstSeen,
            Order::Lexicographic => DumpOrder::Lexicographic,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let platform = match &cli.platform {
        Some(path) => PlatformParameters::load(path)?,
        None => PlatformParameters::ion_trap(),
    };

    let events = match &cli.trace {
        Some(path) => load_trace(path)?,
        None => bernstein_vazirani(&cli.secret)?,
    };
    info!(platform = %platform.name, events = events.len(), "Starting estimation");

    let mut tracker = FrequencyTracker::new();
    let estimator = Dispatcher::new(ResourceEstimator::new(platform)?)
        .with_listener(&mut tracker)
        .run(events)?;
    let snapshot = estimator.into_snapshot();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_physical_layer(&snapshot);
    }

    println!("LOGICAL LAYER");
    print!("{}", tracker.table().render(cli.order.into()));

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn load_trace(path: &Path) -> EstimatorResult<Vec<Event>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Event stream of a Bernstein–Vazirani run recovering `secret`.
///
/// Qubits `0..n` hold the query register; qubit `n` is the phase-kickback
/// target.
fn bernstein_vazirani(secret: &str) -> EstimatorResult<Vec<Event>> {
    let bits = secret
        .chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(EstimatorError::Configuration(format!(
                "secret must be a bit string, found {other:?}"
            ))),
        })
        .collect::<EstimatorResult<Vec<_>>>()?;

    let n = u32::try_from(bits.len()).map_err(|_| {
        EstimatorError::Configuration(format!(
            "secret of {} bits exceeds the qubit handle range",
            bits.len()
        ))
    })?;
    let inputs: Vec<_> = (0..n).map(QubitId).collect();
    let target = QubitId(n);
    let all: Vec<_> = (0..=n).map(QubitId).collect();

    let mut events = vec![
        Event::operation_start("BernsteinVazirani.Run"),
        LogicalGateRequest::Allocate {
            qubits: all.clone(),
        }
        .into(),
        Event::operation_start("Microsoft.Quantum.Intrinsic.X"),
        LogicalGateRequest::X { qubit: target }.into(),
        Event::operation_start("Microsoft.Quantum.Intrinsic.H"),
        LogicalGateRequest::H { qubit: target }.into(),
    ];

    let hadamards = |events: &mut Vec<Event>| {
        for &qubit in &inputs {
            events.push(Event::operation_start("Microsoft.Quantum.Intrinsic.H"));
            events.push(LogicalGateRequest::H { qubit }.into());
        }
    };

    hadamards(&mut events);
    events.push(Event::operation_start("BernsteinVazirani.ParityOracle"));
    for (&qubit, _) in inputs.iter().zip(&bits).filter(|(_, set)| **set) {
        events.push(Event::operation_start("Microsoft.Quantum.Intrinsic.CNOT"));
        events.push(
            LogicalGateRequest::ControlledX {
                controls: vec![qubit],
                target,
            }
            .into(),
        );
    }
    hadamards(&mut events);

    for &qubit in &inputs {
        events.push(Event::operation_start("Microsoft.Quantum.Intrinsic.M"));
        events.push(LogicalGateRequest::Measure { qubit }.into());
    }
    for &qubit in &all {
        events.push(Event::operation_start("Microsoft.Quantum.Intrinsic.Reset"));
        events.push(LogicalGateRequest::Reset { qubit }.into());
    }
    events.push(LogicalGateRequest::Release { qubits: all }.into());

    Ok(events)
}

fn print_physical_layer(snapshot: &LedgerSnapshot) {
    println!("PHYSICAL LAYER");
    println!("Total Statistics\n----------------");
    println!("Qubits: {}", snapshot.total_qubits);
    println!("Gate Count: {}", snapshot.total_gate_count);
    println!("Time: {:.3} us", snapshot.total_time);
    println!("Error: {:.6}", snapshot.total_error);
    println!();

    println!("Gate Statistics\n---------------");
    for (kind, entry) in &snapshot.gates {
        println!("{kind}:");
        println!(" - Count: {}", entry.count);
        println!(" - Time: {:.3} us", entry.time);
        println!(" - Error: {:.6}", entry.error);
    }
    println!();
}
