use thiserror::Error;

use crate::FieldKey;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("component type {0:?} is already registered")]
    DuplicateType(String),

    #[error("field {key} appears more than once in schema {type_name:?}")]
    DuplicateKey { type_name: String, key: FieldKey },

    #[error("schema {type_name:?} has {expected} fields, record has {got}")]
    FieldCount {
        type_name: String,
        expected:  usize,
        got:       usize,
    },

    #[error("cannot decode {value:?} for field {key}: {reason}")]
    Decode {
        key:    FieldKey,
        value:  String,
        reason: String,
    },

    #[error("field {key} holds a {got} value where the schema expects {expected}")]
    KindMismatch {
        key:      FieldKey,
        expected: &'static str,
        got:      &'static str,
    },
}

pub type SchemaResult<T> = Result<T, SchemaError>;
