//! Save-line codec.
//!
//! # Line format
//!
//! ```text
//! <type_name>~<object_type>~<region>~<field_0>~…~<field_N>
//! LogicGate2~Circuit_LogicGate_2~SU~X~Y~AND~OUT~false
//! ```
//!
//! Fields appear in schema declaration order.  Inside any column a literal
//! `~` is written `\~`, a literal `\` is written `\\`, and line breaks are
//! written `\n` and `\r` so a record never spans two lines.  Any other
//! escape sequence is read back verbatim, backslash included.

use circ_schema::{FieldMap, Schema};
use circ_sim::ComponentCatalog;

use crate::RecordError;

pub const SEPARATOR: char = '~';
const ESCAPE: char = '\\';

/// Columns before the first field.
const HEADER_COLUMNS: usize = 3;

/// One decoded save line.
#[derive(Clone, Debug, PartialEq)]
pub struct SaveRecord {
    pub type_name:   String,
    pub object_type: String,
    pub region:      String,
    pub fields:      FieldMap,
}

// ── Escaping ──────────────────────────────────────────────────────────────────

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            SEPARATOR | ESCAPE => {
                out.push(ESCAPE);
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Split a line at every unescaped separator and unescape each column.
pub fn split_line(line: &str) -> Vec<String> {
    let mut columns = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(next @ (SEPARATOR | ESCAPE)) => current.push(next),
                Some('n') => current.push('\n'),
                Some('r') => current.push('\r'),
                Some(other) => {
                    current.push(ESCAPE);
                    current.push(other);
                }
                None => current.push(ESCAPE),
            },
            SEPARATOR => columns.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    columns.push(current);
    columns
}

// ── Records ───────────────────────────────────────────────────────────────────

/// Encode one component's columns into a save line (no trailing newline).
pub fn encode_line(
    schema:    &Schema,
    type_name: &str,
    region:    &str,
    fields:    &FieldMap,
) -> Result<String, RecordError> {
    let values = schema.encode_record(fields)?;
    let header = [type_name, schema.type_name(), region];
    let columns: Vec<String> = header
        .into_iter()
        .map(escape)
        .chain(values.iter().map(|v| escape(v)))
        .collect();
    let separator = SEPARATOR.to_string();
    Ok(columns.join(separator.as_str()))
}

/// Decode one save line against `catalog`.
///
/// The region column is returned as-is; whether that region is loaded is the
/// caller's concern.
pub fn decode_line(catalog: &ComponentCatalog, line: &str) -> Result<SaveRecord, RecordError> {
    let mut columns = split_line(line);
    if columns.len() < HEADER_COLUMNS {
        return Err(RecordError::TooFewFields(columns.len()));
    }
    let values = columns.split_off(HEADER_COLUMNS);
    let [type_name, object_type, region]: [String; HEADER_COLUMNS] = match columns.try_into() {
        Ok(header) => header,
        Err(columns) => return Err(RecordError::TooFewFields(columns.len())),
    };

    if !catalog.has_factory(&type_name) {
        return Err(RecordError::UnknownType(type_name));
    }
    let schema = catalog
        .get_schema(&object_type)
        .ok_or_else(|| RecordError::UnknownObjectType(object_type.clone()))?;
    let fields = schema.decode_record(&values)?;

    Ok(SaveRecord { type_name, object_type, region, fields })
}
