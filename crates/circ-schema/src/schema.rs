//! `Schema` — the ordered field list of one component type.

use crate::{FieldKey, FieldMap, FieldSpec, SchemaError, SchemaResult};

/// Ordered, key-unique list of [`FieldSpec`]s registered for one component
/// type.  The order is the column order of save records.
#[derive(Clone, Debug)]
pub struct Schema {
    type_name: String,
    fields:    Vec<FieldSpec>,
}

impl Schema {
    /// Build a schema, rejecting duplicate keys.
    pub fn new(type_name: impl Into<String>, fields: Vec<FieldSpec>) -> SchemaResult<Self> {
        let type_name = type_name.into();
        for (i, spec) in fields.iter().enumerate() {
            if fields[..i].iter().any(|earlier| earlier.key == spec.key) {
                return Err(SchemaError::DuplicateKey { type_name, key: spec.key });
            }
        }
        Ok(Self { type_name, fields })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.spec(key).is_some()
    }

    pub fn spec(&self, key: FieldKey) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Keys of runtime-state slots (ignored when matching configurations).
    pub fn runtime_keys(&self) -> Vec<FieldKey> {
        self.fields.iter().filter(|f| f.runtime).map(|f| f.key).collect()
    }

    /// A field map holding every slot's default value.
    pub fn defaults(&self) -> FieldMap {
        self.fields.iter().map(|f| (f.key, f.default.clone())).collect()
    }

    /// Decode one record's field strings, in declaration order.
    ///
    /// Fails on a count mismatch or on the first value any decoder rejects;
    /// a partially decoded record is never returned.
    pub fn decode_record<S: AsRef<str>>(&self, values: &[S]) -> SchemaResult<FieldMap> {
        if values.len() != self.fields.len() {
            return Err(SchemaError::FieldCount {
                type_name: self.type_name.clone(),
                expected:  self.fields.len(),
                got:       values.len(),
            });
        }

        self.fields
            .iter()
            .zip(values)
            .map(|(spec, raw)| {
                let raw = raw.as_ref();
                let value = (spec.decode)(raw).map_err(|reason| SchemaError::Decode {
                    key: spec.key,
                    value: raw.to_owned(),
                    reason,
                })?;
                if value.kind() != spec.kind() {
                    return Err(SchemaError::KindMismatch {
                        key:      spec.key,
                        expected: spec.kind().name(),
                        got:      value.kind().name(),
                    });
                }
                Ok((spec.key, value))
            })
            .collect()
    }

    /// Encode a field map into declaration-ordered strings.
    ///
    /// Slots absent from `fields` encode their default.  A value of the wrong
    /// kind is an error rather than a silently corrupted column.
    pub fn encode_record(&self, fields: &FieldMap) -> SchemaResult<Vec<String>> {
        self.fields
            .iter()
            .map(|spec| {
                let value = fields.get(spec.key).unwrap_or(&spec.default);
                (spec.encode)(value).ok_or(SchemaError::KindMismatch {
                    key:      spec.key,
                    expected: spec.kind().name(),
                    got:      value.kind().name(),
                })
            })
            .collect()
    }
}
