//! blinker — a clock-driven flip-flop circuit with persistence and a trace.
//!
//! ```text
//!  Switch ──▶ DATA ─┐
//!                   ├─▶ D flip-flop ──▶ Q ──▶ Light
//!  Clock  ──▶ CLK ──┘                   │
//!                                       └──▶ NOT ──▶ NQ ──▶ Light
//! ```
//!
//! Usage: `blinker [config.toml]`.  The region is loaded from the save
//! directory first, so a second run resumes the saved circuit instead of
//! building a new one.  `RUST_LOG` overrides the configured log filter.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use circ_core::CircuitConfig;
use circ_output::{CsvTraceWriter, TraceObserver};
use circ_persist::{RegionStore, SaveObserver};
use circ_schema::{FieldKey, FieldMap, UnaryOp};
use circ_sim::{CircuitRegistry, ComponentCatalog, TickObserverExt};

// ── Constants ─────────────────────────────────────────────────────────────────

const REGION:    &str = "demo";
const TRACE_DIR: &str = "output/blinker";
const CLOCK_ON:  i32  = 3;
const CLOCK_OFF: i32  = 3;

// ── Circuit ───────────────────────────────────────────────────────────────────

fn fields(pairs: &[(FieldKey, &str)]) -> FieldMap {
    let mut map = FieldMap::new();
    for &(key, value) in pairs {
        map.set(key, value);
    }
    map
}

fn build_circuit(registry: &mut CircuitRegistry) -> Result<()> {
    use FieldKey::*;

    let switch = registry.create_component("Circuit_Switch", REGION, &fields(&[(CircuitId, "DATA")]))?;
    registry.set_raw_activation(switch, true)?;

    let mut clock = fields(&[(CircuitId, "CLK")]);
    clock.set(ClockOnMax, CLOCK_ON);
    clock.set(ClockOffMax, CLOCK_OFF);
    registry.create_component("Circuit_Clock", REGION, &clock)?;

    registry.create_component(
        "Circuit_D_FlipFlop",
        REGION,
        &fields(&[(InputA, "DATA"), (InputClock, "CLK"), (Output, "Q")]),
    )?;

    let mut not = fields(&[(InputA, "Q"), (Output, "NQ")]);
    not.set(LogicOp, UnaryOp::Not);
    registry.create_component("Circuit_LogicGate_1", REGION, &not)?;

    registry.create_component("Circuit_Light", REGION, &fields(&[(CircuitId, "Q")]))?;
    registry.create_component("Circuit_Light", REGION, &fields(&[(CircuitId, "NQ")]))?;
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => CircuitConfig::load(Path::new(&path))?,
        None => CircuitConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1. Registry and saved state.
    let mut registry = CircuitRegistry::new(ComponentCatalog::standard()?, &config);
    let store = RegionStore::open(config.save_dir.clone())?;
    let report = store.load_region(&mut registry, REGION)?;
    if registry.region_components(REGION).is_empty() {
        info!("no saved circuit; building a new one");
        build_circuit(&mut registry)?;
    } else {
        info!(kept = report.kept, created = report.created, "resuming saved circuit");
    }

    // 2. Observers: throttled saves, then the power trace.
    let trace = TraceObserver::new(CsvTraceWriter::new(Path::new(TRACE_DIR))?);
    let mut observer = SaveObserver::new(store).then(trace);

    // 3. Run.
    let t0 = Instant::now();
    registry.run_ticks(config.total_ticks, &mut observer)?;
    let elapsed = t0.elapsed();

    observer.second.finish()?;
    if let Some(e) = observer.second.take_error() {
        eprintln!("trace error: {e}");
    }
    observer.first.store().save_all(&registry)?;
    registry.mark_saved();

    // 4. Summary.
    println!("Simulated {} ticks in {:.3} s", config.total_ticks, elapsed.as_secs_f64());
    println!("  interval saves : {}", observer.first.saves());
    println!("  save directory : {}", observer.first.store().dir().display());
    println!("  trace          : {TRACE_DIR}/power_trace.csv");
    println!();
    println!("{:<8} {:<6} {:<8}", "Circuit", "Power", "Members");
    println!("{}", "-".repeat(24));
    for circuit in registry.circuits() {
        println!(
            "{:<8} {:<6} {:<8}",
            circuit.id(),
            if circuit.has_power() { "on" } else { "off" },
            circuit.len(),
        );
    }

    Ok(())
}
