//! Read-model transformer generation
//!
//! Each included column becomes one key of the resource array. Media columns hold
//! a stored path and are projected through `asset()` so clients receive an absolute
//! URL; everything else is projected verbatim.

use super::code::quote;
use crate::model::ColumnDescriptor;

/// One `'key' => value` entry of the resource array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Quoted column name
    pub key: String,
    pub value: String,
}

/// Projection for one column
pub fn projection(column: &ColumnDescriptor) -> Projection {
    let attr = format!("$this->{}", column.name);
    let value = match column.kind.media() {
        Some(_) => format!("{attr} ? asset({attr}) : null"),
        None => attr,
    };
    Projection {
        key: quote(&column.name),
        value,
    }
}

/// Projections for a filtered column list, in schema order
pub fn projections(columns: &[ColumnDescriptor]) -> Vec<Projection> {
    columns.iter().map(projection).collect()
}
