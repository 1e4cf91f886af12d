//! `FieldSpec` — one schema slot: key, default, and its string codec.
//!
//! # Encodings
//!
//! | Kind      | Encoding                                    |
//! |-----------|---------------------------------------------|
//! | text      | verbatim                                    |
//! | bool      | `true` / `false` (decode is case-insensitive) |
//! | int       | decimal `i32`                               |
//! | float     | shortest round-trip `f32` form              |
//! | binary op | `AND` `NAND` `OR` `NOR` `XOR`               |
//! | unary op  | `Buffer` `NOT`                              |
//!
//! Escaping of the record separator is the save-line codec's job, not the
//! field codec's: text values come out of `decode` exactly as they went into
//! `encode`.

use crate::{BinaryOp, FieldKey, FieldKind, FieldValue, UnaryOp};

/// Encode a value; `None` if the value is of the wrong kind for this slot.
pub type EncodeFn = fn(&FieldValue) -> Option<String>;

/// Decode a string; `Err` carries a human-readable reason.
pub type DecodeFn = fn(&str) -> Result<FieldValue, String>;

/// One entry of a [`Schema`][crate::Schema].
#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub key:     FieldKey,
    pub default: FieldValue,
    pub encode:  EncodeFn,
    pub decode:  DecodeFn,
    /// Runtime state (such as `activated`) rather than configuration.
    /// Live-binding matching ignores runtime fields.
    pub runtime: bool,
}

impl FieldSpec {
    /// A slot with a caller-supplied codec.
    pub fn new(key: FieldKey, default: FieldValue, encode: EncodeFn, decode: DecodeFn) -> Self {
        Self { key, default, encode, decode, runtime: false }
    }

    pub fn text(key: FieldKey, default: &str) -> Self {
        Self::new(key, FieldValue::from(default), encode_text, decode_text)
    }

    pub fn flag(key: FieldKey, default: bool) -> Self {
        Self::new(key, FieldValue::Bool(default), encode_bool, decode_bool)
    }

    pub fn int(key: FieldKey, default: i32) -> Self {
        Self::new(key, FieldValue::Int(default), encode_int, decode_int)
    }

    pub fn float(key: FieldKey, default: f32) -> Self {
        Self::new(key, FieldValue::Float(default), encode_float, decode_float)
    }

    pub fn binary_op(key: FieldKey, default: BinaryOp) -> Self {
        Self::new(key, FieldValue::Binary(default), encode_binary, decode_binary)
    }

    pub fn unary_op(key: FieldKey, default: UnaryOp) -> Self {
        Self::new(key, FieldValue::Unary(default), encode_unary, decode_unary)
    }

    /// The `activated` slot every component carries.
    pub fn activity() -> Self {
        Self::flag(FieldKey::Activated, false).runtime()
    }

    /// Mark this slot as runtime state.
    pub fn runtime(mut self) -> Self {
        self.runtime = true;
        self
    }

    /// Kind of the default value, i.e. the kind this slot holds.
    pub fn kind(&self) -> FieldKind {
        self.default.kind()
    }
}

// ── Built-in codecs ───────────────────────────────────────────────────────────

fn encode_text(v: &FieldValue) -> Option<String> {
    v.as_text().map(str::to_owned)
}

fn decode_text(s: &str) -> Result<FieldValue, String> {
    Ok(FieldValue::Text(s.to_owned()))
}

fn encode_bool(v: &FieldValue) -> Option<String> {
    v.as_bool().map(|b| b.to_string())
}

fn decode_bool(s: &str) -> Result<FieldValue, String> {
    match s.trim() {
        t if t.eq_ignore_ascii_case("true") => Ok(FieldValue::Bool(true)),
        t if t.eq_ignore_ascii_case("false") => Ok(FieldValue::Bool(false)),
        t => Err(format!("expected true or false, got {t:?}")),
    }
}

fn encode_int(v: &FieldValue) -> Option<String> {
    v.as_int().map(|n| n.to_string())
}

fn decode_int(s: &str) -> Result<FieldValue, String> {
    s.trim().parse::<i32>().map(FieldValue::Int).map_err(|e| e.to_string())
}

fn encode_float(v: &FieldValue) -> Option<String> {
    v.as_float().map(|x| x.to_string())
}

/// Non-finite values are rejected: `NaN` never equals itself, so a record
/// holding one could never match its component again.
fn decode_float(s: &str) -> Result<FieldValue, String> {
    let x = s.trim().parse::<f32>().map_err(|e| e.to_string())?;
    if !x.is_finite() {
        return Err(format!("expected a finite number, got {x}"));
    }
    Ok(FieldValue::Float(x))
}

fn encode_binary(v: &FieldValue) -> Option<String> {
    v.as_binary().map(|op| op.name().to_owned())
}

fn decode_binary(s: &str) -> Result<FieldValue, String> {
    s.trim().parse::<BinaryOp>().map(FieldValue::Binary)
}

fn encode_unary(v: &FieldValue) -> Option<String> {
    v.as_unary().map(|op| op.name().to_owned())
}

fn decode_unary(s: &str) -> Result<FieldValue, String> {
    s.trim().parse::<UnaryOp>().map(FieldValue::Unary)
}
