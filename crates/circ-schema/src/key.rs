//! The closed set of component field keys.
//!
//! The string forms are what save files and host editors use; they are part
//! of the save format and must not change.

use std::fmt;
use std::str::FromStr;

/// One configuration or state slot on a component.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum FieldKey {
    /// Membership circuit of plain inputs and outputs.
    CircuitId,
    /// Runtime activation flag.
    Activated,
    /// First input circuit of a gate, or D/T/J of a flip-flop.
    InputA,
    /// Second input circuit of a gate, or K of a JK flip-flop.
    InputB,
    /// Clock input circuit of a flip-flop.
    InputClock,
    /// Membership circuit of gates and flip-flops.
    Output,
    /// Gate operator.
    LogicOp,
    /// Clock on-phase length in ticks.
    ClockOnMax,
    /// Clock off-phase length in ticks.
    ClockOffMax,
    Sine,
    Flicker,
    Strength,
    Red,
    Green,
    Blue,
}

impl FieldKey {
    pub const ALL: [FieldKey; 15] = [
        FieldKey::CircuitId,
        FieldKey::Activated,
        FieldKey::InputA,
        FieldKey::InputB,
        FieldKey::InputClock,
        FieldKey::Output,
        FieldKey::LogicOp,
        FieldKey::ClockOnMax,
        FieldKey::ClockOffMax,
        FieldKey::Sine,
        FieldKey::Flicker,
        FieldKey::Strength,
        FieldKey::Red,
        FieldKey::Green,
        FieldKey::Blue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::CircuitId   => "circuit_id",
            FieldKey::Activated   => "activated",
            FieldKey::InputA      => "l_inputA",
            FieldKey::InputB      => "l_inputB",
            FieldKey::InputClock  => "l_inputClock",
            FieldKey::Output      => "l_output",
            FieldKey::LogicOp     => "logic",
            FieldKey::ClockOnMax  => "clock_on",
            FieldKey::ClockOffMax => "clock_off",
            FieldKey::Sine        => "sine",
            FieldKey::Flicker     => "flicker",
            FieldKey::Strength    => "strength",
            FieldKey::Red         => "red",
            FieldKey::Green       => "green",
            FieldKey::Blue        => "blue",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown field key {s:?}"))
    }
}
