use circ_schema::SchemaError;
use circ_sim::CircuitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("region name {0:?} cannot be used as a file name")]
    InvalidRegion(String),

    #[error("{} region(s) failed to save: {failed:?} ({saved} saved)", failed.len())]
    PartialSave { failed: Vec<String>, saved: usize },
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Why a single save line was dropped.  Never fatal: the loader logs it and
/// moves on to the next line.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("expected at least 3 fields, found {0}")]
    TooFewFields(usize),

    #[error("unknown component type {0:?}")]
    UnknownType(String),

    #[error("unknown object type {0:?}")]
    UnknownObjectType(String),

    #[error("region {0:?} is not loaded")]
    UnloadedRegion(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Circuit(#[from] CircuitError),
}
