//! Core error types.
//!
//! Every failure a caller can provoke is surfaced as an [`Error`] value.
//! Indexing past the end of a chunk, segment, or attribute vector is a
//! programmer error and panics, like slice indexing does.

use thiserror::Error;

use crate::types::ElementType;

/// Errors surfaced by the storage layer and operators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value could not be converted to the required element type, or a
    /// scan search value did not match the target column's type.
    #[error("type mismatch: cannot convert {from} value to {to}")]
    TypeMismatch {
        /// Element type of the offending value.
        from: ElementType,
        /// Element type that was required.
        to: ElementType,
    },

    /// A row was appended with the wrong number of values.
    #[error("arity mismatch: row has {actual} values, chunk has {expected} segments")]
    ArityMismatch {
        /// Segment count of the chunk.
        expected: usize,
        /// Value count of the row.
        actual: usize,
    },

    /// A column name was not found in the table schema.
    #[error("unknown column: {name}")]
    UnknownColumn {
        /// The name that was looked up.
        name: String,
    },

    /// A table with this name is already registered.
    #[error("a table named {name} already exists")]
    DuplicateTable {
        /// The conflicting name.
        name: String,
    },

    /// No table with this name is registered.
    #[error("no table named {name} exists")]
    UnknownTable {
        /// The name that was looked up.
        name: String,
    },

    /// Columns can only be added while the table holds no rows.
    #[error("cannot add column {name} to a table that already holds rows")]
    NonEmptyAddColumn {
        /// The column that was being added.
        name: String,
    },

    /// Append on a dictionary or reference segment, or re-encoding a chunk
    /// whose segments are no longer value segments.
    #[error("segment is immutable")]
    ImmutableSegment,

    /// The unique-value count exceeds every supported attribute-vector width.
    #[error("dictionary overflow: {unique_values} unique values exceed the widest attribute vector")]
    DictionaryOverflow {
        /// Unique values in the would-be dictionary.
        unique_values: usize,
    },

    /// A scan input mixed reference segments over different base tables.
    #[error("scan input references more than one base table")]
    HeterogeneousReferenceInput,
}
