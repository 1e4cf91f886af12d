//! CSV trace backend.
//!
//! Creates two files in the output directory:
//! - `power_trace.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{OutputResult, PowerRow, TickSummaryRow};

pub const POWER_FILE: &str = "power_trace.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes the trace to two CSV files.
pub struct CsvTraceWriter {
    power:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvTraceWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut power = Writer::from_path(dir.join(POWER_FILE))?;
        power.write_record(["tick", "circuit_id", "has_power"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(["tick", "circuits", "pruned", "migrations", "saved"])?;

        Ok(Self { power, summaries, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_power(&mut self, rows: &[PowerRow]) -> OutputResult<()> {
        for row in rows {
            self.power.write_record([
                row.tick.to_string().as_str(),
                row.circuit_id.as_str(),
                if row.has_power { "1" } else { "0" },
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.circuits.to_string(),
            row.pruned.to_string(),
            row.migrations.to_string(),
            (row.saved as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.power.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
