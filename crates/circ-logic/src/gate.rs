//! Combinational gates.
//!
//! A gate latches its input levels in `set_inputs`; its output is computed on
//! demand from the latched levels and the operator currently configured on
//! the component, so an operator change takes effect without re-latching.

use circ_schema::{BinaryOp, UnaryOp};

use crate::{LogicError, LogicResult};

/// Truth table of the two-input operators.
#[inline]
pub fn eval_binary(op: BinaryOp, a: bool, b: bool) -> bool {
    match op {
        BinaryOp::And  => a && b,
        BinaryOp::Nand => !(a && b),
        BinaryOp::Or   => a || b,
        BinaryOp::Nor  => !(a || b),
        BinaryOp::Xor  => a ^ b,
    }
}

/// Truth table of the one-input operators.
#[inline]
pub fn eval_unary(op: UnaryOp, a: bool) -> bool {
    match op {
        UnaryOp::Buffer => a,
        UnaryOp::Not    => !a,
    }
}

/// Input latching shared by every gate shape.
pub trait LogicGate {
    /// Number of input levels `set_inputs` expects.
    fn arity(&self) -> usize;

    /// Latch new input levels.
    ///
    /// # Errors
    /// [`LogicError::Arity`] if `inputs.len() != self.arity()`.  The latched
    /// state is unchanged on error.
    fn set_inputs(&mut self, inputs: &[bool]) -> LogicResult<()>;
}

// ── Two inputs ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinaryGate {
    a: bool,
    b: bool,
}

impl BinaryGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self, op: BinaryOp) -> bool {
        eval_binary(op, self.a, self.b)
    }

    pub fn inputs(&self) -> (bool, bool) {
        (self.a, self.b)
    }
}

impl LogicGate for BinaryGate {
    fn arity(&self) -> usize {
        2
    }

    fn set_inputs(&mut self, inputs: &[bool]) -> LogicResult<()> {
        let &[a, b] = inputs else {
            return Err(LogicError::Arity { expected: self.arity(), got: inputs.len() });
        };
        self.a = a;
        self.b = b;
        Ok(())
    }
}

// ── One input ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnaryGate {
    a: bool,
}

impl UnaryGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self, op: UnaryOp) -> bool {
        eval_unary(op, self.a)
    }

    pub fn input(&self) -> bool {
        self.a
    }
}

impl LogicGate for UnaryGate {
    fn arity(&self) -> usize {
        1
    }

    fn set_inputs(&mut self, inputs: &[bool]) -> LogicResult<()> {
        let &[a] = inputs else {
            return Err(LogicError::Arity { expected: self.arity(), got: inputs.len() });
        };
        self.a = a;
        Ok(())
    }
}
