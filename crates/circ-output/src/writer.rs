//! The `TraceWriter` trait implemented by trace backends.

use crate::{OutputResult, PowerRow, TickSummaryRow};

/// Sink for power rows and tick summaries.
///
/// Errors surface through [`TraceObserver::take_error`][crate::TraceObserver::take_error]
/// when the writer is driven by the tick loop.
pub trait TraceWriter {
    /// Write one tick's batch of power rows.
    fn write_power(&mut self, rows: &[PowerRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
