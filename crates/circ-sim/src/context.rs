//! Read-only state shared by every circuit during one registry tick.

use circ_core::Tick;

#[cfg(feature = "fx-hash")]
pub(crate) type PowerMap = rustc_hash::FxHashMap<String, bool>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type PowerMap = std::collections::HashMap<String, bool>;

/// Previous-tick circuit power, captured before any circuit is evaluated.
///
/// Gates and flip-flops read their inputs through this snapshot, which is
/// what gives every cross-circuit reference its one-tick lag regardless of
/// the order circuits are evaluated in.
pub struct TickContext<'a> {
    /// Tick being evaluated.
    pub tick: Tick,

    power: &'a PowerMap,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub(crate) fn new(tick: Tick, power: &'a PowerMap) -> Self {
        Self { tick, power }
    }

    /// Power of `circuit_id` at the end of the previous tick.  An unknown
    /// circuit is unpowered.
    #[inline]
    pub fn circuit_power(&self, circuit_id: &str) -> bool {
        self.power.get(circuit_id).copied().unwrap_or(false)
    }
}
