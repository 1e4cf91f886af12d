//! Edge-triggered flip-flops.
//!
//! # Timing
//!
//! ```text
//! tick T     clock rises  → q_next computed, delay counter = DEFAULT_DELAY
//! tick T+1   counter hits 0 → q_prev = q_next  (visible as output)
//! ```
//!
//! Each [`FlipFlop::step`] validates and latches the new pin levels, advances
//! the delay counter (committing the pending state when it reaches zero), and
//! then checks for a rising clock edge.  An edge evaluates the next state from
//! the already-committed `q_prev`, so a T flip-flop toggles once per edge.

use std::collections::BTreeMap;
use std::fmt;

use crate::{LogicError, LogicResult};

/// Ticks between a rising clock edge and the output changing.
pub const DEFAULT_DELAY: u32 = 1;

/// Named flip-flop input.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Pin {
    D,
    T,
    J,
    K,
    Clock,
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pin::D     => "D",
            Pin::T     => "T",
            Pin::J     => "J",
            Pin::K     => "K",
            Pin::Clock => "Clock",
        })
    }
}

/// Input levels keyed by pin.
pub type PinMap = BTreeMap<Pin, bool>;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FlipFlopKind {
    D,
    T,
    JK,
}

impl FlipFlopKind {
    /// Pins `set_inputs` requires for this kind.
    pub fn pins(self) -> &'static [Pin] {
        match self {
            FlipFlopKind::D  => &[Pin::D, Pin::Clock],
            FlipFlopKind::T  => &[Pin::T, Pin::Clock],
            FlipFlopKind::JK => &[Pin::J, Pin::K, Pin::Clock],
        }
    }
}

/// Sequential state of one flip-flop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlipFlop {
    kind:       FlipFlopKind,
    q_prev:     bool,
    q_next:     bool,
    last_clock: bool,
    /// Ticks left before `q_next` is committed; 0 = nothing pending.
    pending:    u32,
    delay:      u32,
    inputs:     PinMap,
}

impl FlipFlop {
    pub fn new(kind: FlipFlopKind) -> Self {
        Self::with_delay(kind, DEFAULT_DELAY)
    }

    /// A flip-flop whose output follows a clock edge after `delay` ticks.
    /// `delay == 0` commits on the edge itself.
    pub fn with_delay(kind: FlipFlopKind, delay: u32) -> Self {
        Self {
            kind,
            q_prev: false,
            q_next: false,
            last_clock: false,
            pending: delay,
            delay,
            inputs: PinMap::new(),
        }
    }

    pub fn kind(&self) -> FlipFlopKind {
        self.kind
    }

    /// The committed state `q_prev`.
    pub fn output(&self) -> bool {
        self.q_prev
    }

    /// The state that will be committed once the delay runs out.
    pub fn pending_state(&self) -> bool {
        self.q_next
    }

    pub fn last_clock(&self) -> bool {
        self.last_clock
    }

    /// Validate and latch pin levels.
    ///
    /// # Errors
    /// [`LogicError::MissingInput`] naming the first required pin absent from
    /// `inputs`.  Nothing is latched on error.
    pub fn set_inputs(&mut self, inputs: PinMap) -> LogicResult<()> {
        if let Some(&pin) = self.kind.pins().iter().find(|p| !inputs.contains_key(*p)) {
            return Err(LogicError::MissingInput { kind: self.kind, pin });
        }
        self.inputs = inputs;
        Ok(())
    }

    /// Advance the delay counter, committing `q_next` when it reaches zero.
    pub fn advance(&mut self) {
        if self.pending > 0 {
            self.pending -= 1;
            if self.pending == 0 {
                self.q_prev = self.q_next;
            }
        }
    }

    /// Sample the latched clock level; on a rising edge compute `q_next`.
    pub fn sample_clock(&mut self) {
        let clock = self.level(Pin::Clock);
        if !self.last_clock && clock {
            let q = self.q_prev;
            self.q_next = match self.kind {
                FlipFlopKind::D  => self.level(Pin::D),
                FlipFlopKind::T  => if self.level(Pin::T) { !q } else { q },
                FlipFlopKind::JK => (self.level(Pin::J) && !q) || (!self.level(Pin::K) && q),
            };
            if self.delay == 0 {
                self.q_prev = self.q_next;
            } else {
                self.pending = self.delay;
            }
        }
        self.last_clock = clock;
    }

    /// One tick: latch `inputs`, advance the delay, sample the clock.
    /// A missing pin aborts the step before any state changes.
    pub fn step(&mut self, inputs: PinMap) -> LogicResult<()> {
        self.set_inputs(inputs)?;
        self.advance();
        self.sample_clock();
        Ok(())
    }

    /// Drop the pending state so a rewired flip-flop cannot fire on stale
    /// latched values.
    pub fn clear(&mut self) {
        self.q_next = false;
    }

    fn level(&self, pin: Pin) -> bool {
        self.inputs.get(&pin).copied().unwrap_or(false)
    }
}
