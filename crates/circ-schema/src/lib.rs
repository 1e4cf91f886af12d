//! `circ-schema` — typed component configuration and its string codec.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`key`]       | `FieldKey` — the closed set of configuration keys           |
//! | [`value`]     | `FieldValue`, `BinaryOp`, `UnaryOp`                         |
//! | [`field`]     | `FieldMap` — typed key → value bag with checked accessors   |
//! | [`spec`]      | `FieldSpec` — key, default, encode fn, decode fn            |
//! | [`schema`]    | `Schema` — ordered field list, `encode_record`/`decode_record` |
//! | [`registry`]  | `SchemaRegistry` — type name → `Schema`                     |
//! | [`error`]     | `SchemaError`, `SchemaResult<T>`                            |
//!
//! # Design notes
//!
//! Simulation code only ever sees typed values (`FieldMap::text`,
//! `FieldMap::flag`, …).  Strings appear at exactly one boundary: a schema's
//! `encode_record`/`decode_record`, which the persistence layer calls when it
//! reads or writes a save line.

pub mod error;
pub mod field;
pub mod key;
pub mod registry;
pub mod schema;
pub mod spec;
pub mod value;


pub use error::{SchemaError, SchemaResult};
pub use field::FieldMap;
pub use key::FieldKey;
pub use registry::SchemaRegistry;
pub use schema::Schema;
pub use spec::{DecodeFn, EncodeFn, FieldSpec};
pub use value::{BinaryOp, FieldKind, FieldValue, UnaryOp};
