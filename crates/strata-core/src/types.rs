//! Identifier types shared across the storage layer and operators.

use std::fmt;
use std::str::FromStr;

/// Index of a chunk within a table.
pub type ChunkId = u32;

/// Offset of a row within a chunk.
pub type ChunkOffset = u32;

/// Index of a column within a table schema.
pub type ColumnId = u16;

/// Index into a dictionary segment's sorted distinct values.
pub type ValueId = u32;

/// Sentinel dictionary index meaning "past the last entry".
///
/// Attribute vectors narrower than four bytes truncate this to their own
/// all-ones value, so the sentinel survives width fitting at every width.
pub const INVALID_VALUE_ID: ValueId = ValueId::MAX;

/// Canonical reference to a logical row: which chunk, and where in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId {
    /// Chunk index within the owning table.
    pub chunk_id: ChunkId,
    /// Row offset within that chunk.
    pub chunk_offset: ChunkOffset,
}

impl RowId {
    /// Create a row identifier from its parts.
    pub fn new(chunk_id: ChunkId, chunk_offset: ChunkOffset) -> Self {
        Self {
            chunk_id,
            chunk_offset,
        }
    }
}

/// Ordered sequence of row identifiers, produced by a scan and shared
/// read-only by every reference segment of the result table.
pub type PosList = Vec<RowId>;

/// Scalar element types a column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 32-bit signed integer ("int").
    Int32,
    /// 64-bit signed integer ("long").
    Int64,
    /// 32-bit floating point ("float").
    Float32,
    /// 64-bit floating point ("double").
    Float64,
    /// UTF-8 string ("string").
    String,
}

impl ElementType {
    /// The surface name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Int32 => "int",
            ElementType::Int64 => "long",
            ElementType::Float32 => "float",
            ElementType::Float64 => "double",
            ElementType::String => "string",
        }
    }

    /// Check if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ElementType::String)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "int" => Ok(ElementType::Int32),
            "long" => Ok(ElementType::Int64),
            "float" => Ok(ElementType::Float32),
            "double" => Ok(ElementType::Float64),
            "string" => Ok(ElementType::String),
            _ => Err(format!("unknown element type: {s}")),
        }
    }
}

/// Comparison predicate of a table scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanType {
    /// `column = value`
    Equals,
    /// `column != value`
    NotEquals,
    /// `column < value`
    LessThan,
    /// `column <= value`
    LessThanEquals,
    /// `column > value`
    GreaterThan,
    /// `column >= value`
    GreaterThanEquals,
}

impl ScanType {
    /// Evaluate this predicate on a column value and a search value.
    pub fn matches<T: PartialOrd>(&self, value: &T, search_value: &T) -> bool {
        match self {
            ScanType::Equals => value == search_value,
            ScanType::NotEquals => value != search_value,
            ScanType::LessThan => value < search_value,
            ScanType::LessThanEquals => value <= search_value,
            ScanType::GreaterThan => value > search_value,
            ScanType::GreaterThanEquals => value >= search_value,
        }
    }
}
