//! Plain data row types written by trace writers.

use circ_sim::TickReport;

/// One circuit's power after its evaluation in a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerRow {
    pub tick:       u64,
    pub circuit_id: String,
    pub has_power:  bool,
}

/// Per-tick registry counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub circuits:   u64,
    pub pruned:     u64,
    pub migrations: u64,
    pub saved:      bool,
}

impl From<&TickReport> for TickSummaryRow {
    fn from(report: &TickReport) -> Self {
        Self {
            tick:       report.tick.0,
            circuits:   report.circuits as u64,
            pruned:     report.pruned as u64,
            migrations: report.migrations as u64,
            saved:      report.saved,
        }
    }
}
