//! `circ-output` — trace writers for circuit runs.
//!
//! | File                 | Columns                                        |
//! |----------------------|------------------------------------------------|
//! | `power_trace.csv`    | `tick,circuit_id,has_power`                    |
//! | `tick_summaries.csv` | `tick,circuits,pruned,migrations,saved`        |
//!
//! Writers implement [`TraceWriter`] and are driven by [`TraceObserver`],
//! which implements `circ_sim::TickObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use circ_output::{CsvTraceWriter, TraceObserver};
//!
//! let mut trace = TraceObserver::new(CsvTraceWriter::new(Path::new("./trace"))?);
//! registry.run_ticks(100, &mut trace)?;
//! trace.finish()?;
//! trace.take_error().map(|e| eprintln!("trace error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{PowerRow, TickSummaryRow};
pub use writer::TraceWriter;
