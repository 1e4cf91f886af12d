//! `FieldMap` — a component's typed field bag.

use std::collections::BTreeMap;

use crate::{BinaryOp, FieldKey, FieldValue, UnaryOp};

/// Typed key → value mapping.
///
/// Accessors return `None` both for an absent key and for a value of the
/// wrong kind; callers decide what a missing value means (usually "use the
/// schema default" or "treat as unpowered").
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FieldMap {
    values: BTreeMap<FieldKey, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.values.get(&key)
    }

    /// Insert or replace `key`, returning the previous value.
    pub fn set(&mut self, key: FieldKey, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(key, value.into())
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    // ── Typed accessors ───────────────────────────────────────────────────

    pub fn text(&self, key: FieldKey) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn flag(&self, key: FieldKey) -> Option<bool> {
        self.get(key).and_then(FieldValue::as_bool)
    }

    pub fn int(&self, key: FieldKey) -> Option<i32> {
        self.get(key).and_then(FieldValue::as_int)
    }

    pub fn float(&self, key: FieldKey) -> Option<f32> {
        self.get(key).and_then(FieldValue::as_float)
    }

    pub fn binary_op(&self, key: FieldKey) -> Option<BinaryOp> {
        self.get(key).and_then(FieldValue::as_binary)
    }

    pub fn unary_op(&self, key: FieldKey) -> Option<UnaryOp> {
        self.get(key).and_then(FieldValue::as_unary)
    }

    // ── Comparison ────────────────────────────────────────────────────────

    /// `true` if both maps hold the same keys with equal values, ignoring
    /// every key in `skip`.
    pub fn matches_except(&self, other: &FieldMap, skip: &[FieldKey]) -> bool {
        let relevant = |m: &FieldMap| {
            m.values
                .iter()
                .filter(|(k, _)| !skip.contains(k))
                .count()
        };
        relevant(self) == relevant(other)
            && self
                .values
                .iter()
                .filter(|(k, _)| !skip.contains(k))
                .all(|(k, v)| other.values.get(k) == Some(v))
    }
}

impl FromIterator<(FieldKey, FieldValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (FieldKey, FieldValue)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl Extend<(FieldKey, FieldValue)> for FieldMap {
    fn extend<I: IntoIterator<Item = (FieldKey, FieldValue)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}
