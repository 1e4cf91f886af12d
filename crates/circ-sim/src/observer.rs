//! Tick observer trait for persistence, tracing and data collection.

use circ_core::Tick;

use crate::CircuitRegistry;

/// Summary of one registry tick, returned by
/// [`CircuitRegistry::tick`][crate::CircuitRegistry::tick].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub tick:       Tick,
    /// Circuits evaluated (non-empty at the start of the tick).
    pub circuits:   usize,
    /// Empty circuits removed.
    pub pruned:     usize,
    /// Components moved to a different circuit.
    pub migrations: usize,
    /// Whether a save was due and succeeded.
    pub saved:      bool,
}

/// Result of an [`on_save_due`][TickObserver::on_save_due] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The observer does not persist anything.
    NotHandled,
    Saved,
    /// Persisting failed; the message is logged and the save retried at the
    /// next interval.
    Failed(String),
}

impl SaveOutcome {
    /// Combine the outcomes of two observers: any failure wins, then any
    /// success.
    pub fn merge(self, other: SaveOutcome) -> SaveOutcome {
        match (self, other) {
            (SaveOutcome::Failed(a), SaveOutcome::Failed(b)) => SaveOutcome::Failed(format!("{a}; {b}")),
            (f @ SaveOutcome::Failed(_), _) | (_, f @ SaveOutcome::Failed(_)) => f,
            (SaveOutcome::Saved, _) | (_, SaveOutcome::Saved) => SaveOutcome::Saved,
            _ => SaveOutcome::NotHandled,
        }
    }
}

/// Callbacks invoked by [`CircuitRegistry::tick`][crate::CircuitRegistry::tick].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait TickObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after each circuit is evaluated.
    fn on_circuit_power(&mut self, _tick: Tick, _circuit_id: &str, _has_power: bool) {}

    /// Called on save-interval ticks when the topology changed since the last
    /// successful save.  Implementors persist `registry` and report how it
    /// went.
    fn on_save_due(&mut self, _tick: Tick, _registry: &CircuitRegistry) -> SaveOutcome {
        SaveOutcome::NotHandled
    }

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _report: &TickReport) {}
}

/// A [`TickObserver`] that does nothing.
pub struct NoopObserver;

impl TickObserver for NoopObserver {}

// ── Chained observer ──────────────────────────────────────────────────────────

/// Two observers called in order.  Construct with `a.then(b)`.
pub struct ChainedObserver<A: TickObserver, B: TickObserver> {
    pub first:  A,
    pub second: B,
}

impl<A: TickObserver, B: TickObserver> TickObserver for ChainedObserver<A, B> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.first.on_tick_start(tick);
        self.second.on_tick_start(tick);
    }

    fn on_circuit_power(&mut self, tick: Tick, circuit_id: &str, has_power: bool) {
        self.first.on_circuit_power(tick, circuit_id, has_power);
        self.second.on_circuit_power(tick, circuit_id, has_power);
    }

    fn on_save_due(&mut self, tick: Tick, registry: &CircuitRegistry) -> SaveOutcome {
        let first = self.first.on_save_due(tick, registry);
        first.merge(self.second.on_save_due(tick, registry))
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.first.on_tick_end(report);
        self.second.on_tick_end(report);
    }
}

/// Extension trait that adds `.then(other)` to any `TickObserver`.
pub trait TickObserverExt: TickObserver + Sized {
    fn then<B: TickObserver>(self, other: B) -> ChainedObserver<Self, B> {
        ChainedObserver { first: self, second: other }
    }
}

impl<O: TickObserver + Sized> TickObserverExt for O {}

// `&mut O` forwards, so callers can keep ownership of their observers.
impl<O: TickObserver + ?Sized> TickObserver for &mut O {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_circuit_power(&mut self, tick: Tick, circuit_id: &str, has_power: bool) {
        (**self).on_circuit_power(tick, circuit_id, has_power);
    }

    fn on_save_due(&mut self, tick: Tick, registry: &CircuitRegistry) -> SaveOutcome {
        (**self).on_save_due(tick, registry)
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        (**self).on_tick_end(report);
    }
}
