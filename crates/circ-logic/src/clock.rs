//! Clock generator: a down-counter that toggles its owner's activation.
//!
//! ```text
//! counter:  0 → -1 → … → -(off+1)  ⇒ reset to +on, activated = true
//!           on → … → 1 → 0         ⇒ activated = false
//! ```
//!
//! A freshly created clock therefore starts in its off phase and first fires
//! `off_max + 1` ticks after creation.

/// Clock counter state.  `on_max` and `off_max` are passed on every tick so
/// edits to the owning component's fields apply immediately.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockGen {
    counter: i32,
}

impl ClockGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> i32 {
        self.counter
    }

    /// Advance one tick.  Returns the new activation level when the clock
    /// switches phase, `None` otherwise.
    pub fn tick(&mut self, on_max: i32, off_max: i32) -> Option<bool> {
        self.counter = self.counter.saturating_sub(1);
        if self.counter < off_max.saturating_neg() {
            self.counter = on_max;
            Some(true)
        } else if self.counter == 0 {
            Some(false)
        } else {
            None
        }
    }
}
