//! `TraceObserver<W>` — bridges `TickObserver` to a `TraceWriter`.

use circ_core::Tick;
use circ_sim::{TickObserver, TickReport};

use crate::row::{PowerRow, TickSummaryRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`TickObserver`] that writes every circuit's power and a per-tick
/// summary to a [`TraceWriter`].
///
/// Observer hooks cannot fail, so writer errors are stored.  Check them with
/// [`take_error`][Self::take_error] once the run is over.
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    pending:    Vec<PowerRow>,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::new(), last_error: None }
    }

    /// Take the stored write error, if any.  Only the first is kept.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Call after the last tick.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> TickObserver for TraceObserver<W> {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.pending.clear();
    }

    fn on_circuit_power(&mut self, tick: Tick, circuit_id: &str, has_power: bool) {
        self.pending.push(PowerRow { tick: tick.0, circuit_id: circuit_id.to_owned(), has_power });
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        if !self.pending.is_empty() {
            let rows = std::mem::take(&mut self.pending);
            let result = self.writer.write_power(&rows);
            self.store_err(result);
        }
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(report));
        self.store_err(result);
    }
}
