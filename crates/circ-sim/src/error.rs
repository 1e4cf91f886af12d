use circ_core::ComponentId;
use circ_logic::LogicError;
use circ_schema::{FieldKey, SchemaError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("no component factory registered for type name {0:?}")]
    UnknownType(String),

    #[error("no schema registered for object type {0:?}")]
    UnknownObjectType(String),

    #[error("factory for {type_name:?} is already registered")]
    DuplicateFactory { type_name: String },

    #[error("{type_name:?} components need field {key}, which the schema lacks")]
    MissingField { type_name: String, key: FieldKey },

    #[error("object type {object_type:?} has no field {key}")]
    UnknownField { object_type: String, key: FieldKey },

    #[error("unknown component {0}")]
    UnknownComponent(ComponentId),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("logic evaluation error: {0}")]
    Logic(#[from] LogicError),
}

pub type CircuitResult<T> = Result<T, CircuitError>;
