//! Field values and the gate operator enums they can carry.

use std::fmt;
use std::str::FromStr;

// ── Gate operators ────────────────────────────────────────────────────────────

/// Operator of a two-input logic gate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum BinaryOp {
    #[default]
    And,
    Nand,
    Or,
    Nor,
    Xor,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] =
        [BinaryOp::And, BinaryOp::Nand, BinaryOp::Or, BinaryOp::Nor, BinaryOp::Xor];

    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::And  => "AND",
            BinaryOp::Nand => "NAND",
            BinaryOp::Or   => "OR",
            BinaryOp::Nor  => "NOR",
            BinaryOp::Xor  => "XOR",
        }
    }
}

impl FromStr for BinaryOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BinaryOp::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("expected one of AND, NAND, OR, NOR, XOR; got {s:?}"))
    }
}

/// Operator of a one-input logic gate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum UnaryOp {
    Buffer,
    #[default]
    Not,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 2] = [UnaryOp::Buffer, UnaryOp::Not];

    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Buffer => "Buffer",
            UnaryOp::Not    => "NOT",
        }
    }
}

impl FromStr for UnaryOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnaryOp::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("expected Buffer or NOT; got {s:?}"))
    }
}

// ── FieldValue ────────────────────────────────────────────────────────────────

/// The kind of value a field holds.  Used in error messages and to check a
/// value against its schema slot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FieldKind {
    Text,
    Bool,
    Int,
    Float,
    Binary,
    Unary,
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Text   => "text",
            FieldKind::Bool   => "bool",
            FieldKind::Int    => "int",
            FieldKind::Float  => "float",
            FieldKind::Binary => "binary-op",
            FieldKind::Unary  => "unary-op",
        }
    }
}

/// One typed field value.
#[derive(Clone, PartialEq, Debug)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Int(i32),
    Float(f32),
    Binary(BinaryOp),
    Unary(UnaryOp),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_)   => FieldKind::Text,
            FieldValue::Bool(_)   => FieldKind::Bool,
            FieldValue::Int(_)    => FieldKind::Int,
            FieldValue::Float(_)  => FieldKind::Float,
            FieldValue::Binary(_) => FieldKind::Binary,
            FieldValue::Unary(_)  => FieldKind::Unary,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            FieldValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            FieldValue::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            FieldValue::Float(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<BinaryOp> {
        match *self {
            FieldValue::Binary(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_unary(&self) -> Option<UnaryOp> {
        match *self {
            FieldValue::Unary(op) => Some(op),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Int(n)
    }
}

impl From<f32> for FieldValue {
    fn from(x: f32) -> Self {
        FieldValue::Float(x)
    }
}

impl From<BinaryOp> for FieldValue {
    fn from(op: BinaryOp) -> Self {
        FieldValue::Binary(op)
    }
}

impl From<UnaryOp> for FieldValue {
    fn from(op: UnaryOp) -> Self {
        FieldValue::Unary(op)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s)    => f.write_str(s),
            FieldValue::Bool(b)    => write!(f, "{b}"),
            FieldValue::Int(n)     => write!(f, "{n}"),
            FieldValue::Float(x)   => write!(f, "{x}"),
            FieldValue::Binary(op) => f.write_str(op.name()),
            FieldValue::Unary(op)  => f.write_str(op.name()),
        }
    }
}
