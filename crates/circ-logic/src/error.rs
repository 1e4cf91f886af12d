use thiserror::Error;

use crate::{FlipFlopKind, Pin};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogicError {
    #[error("invalid argument: gate takes {expected} input(s), got {got}")]
    Arity { expected: usize, got: usize },

    #[error("invalid argument: {kind:?} flip-flop requires input {pin}")]
    MissingInput { kind: FlipFlopKind, pin: Pin },
}

pub type LogicResult<T> = Result<T, LogicError>;
