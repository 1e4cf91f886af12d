//! `circ-logic` — pure state machines evaluated by circuits.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`gate`]       | `LogicGate` trait, `BinaryGate`, `UnaryGate`, truth tables |
//! | [`flip_flop`]  | `FlipFlop`, `FlipFlopKind`, `Pin`, `PinMap`               |
//! | [`clock`]      | `ClockGen` — on/off pulse down-counter                    |
//! | [`error`]      | `LogicError`, `LogicResult<T>`                            |
//!
//! Nothing here knows about circuits or registries.  Callers fetch input
//! levels (the previous tick's circuit power) and feed them in; the
//! evaluators only latch, compare and count.
//!
//! `LogicError` signals a wiring bug in the caller, never bad data: a gate
//! handed the wrong number of inputs, or a flip-flop missing a pin.

pub mod clock;
pub mod error;
pub mod flip_flop;
pub mod gate;


pub use clock::ClockGen;
pub use error::{LogicError, LogicResult};
pub use flip_flop::{DEFAULT_DELAY, FlipFlop, FlipFlopKind, Pin, PinMap};
pub use gate::{BinaryGate, LogicGate, UnaryGate, eval_binary, eval_unary};
