//! Strata Core - chunked columnar storage and the table scan.
//!
//! Tables are horizontally partitioned into fixed-capacity chunks of
//! per-column segments. Segments come in three encodings: append-only
//! value segments, immutable dictionary segments with width-fitted
//! attribute vectors, and reference segments projecting a shared position
//! list over a base table. The single relational operator is the
//! predicate-driven table scan, which dispatches per chunk on the segment
//! encoding and materialises reference-segment result tables.

pub mod error;
pub mod operators;
pub mod storage;
pub mod types;
pub mod value;

pub use error::Error;
pub use operators::{Operator, TableScan, TableWrapper};
pub use storage::{
    AttributeVector, Chunk, DictionarySegment, DictionaryValues, ReferenceSegment, Segment,
    Table, TableRegistry, TableSummary, ValueSegment,
};
pub use types::{
    ChunkId, ChunkOffset, ColumnId, ElementType, PosList, RowId, ScanType, ValueId,
    INVALID_VALUE_ID,
};
pub use value::{ElementValue, Value};
