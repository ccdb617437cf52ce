//! The polymorphic column-segment surface.

use crate::error::Error;
use crate::storage::{DictionarySegment, ReferenceSegment, ValueSegment};
use crate::types::ElementType;
use crate::value::Value;

/// A column's values within one chunk, under one of three encodings.
///
/// The closed variant set lets operators dispatch exhaustively on the
/// encoding once per chunk while callers that do not care about encoding
/// use the uniform `value_at`/`len`/`append` surface.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Append-only, uncompressed.
    Value(ValueSegment),
    /// Immutable, dictionary-encoded.
    Dictionary(DictionarySegment),
    /// Immutable projection over a base table.
    Reference(ReferenceSegment),
}

impl Segment {
    /// The element type stored in (or projected by) this segment.
    pub fn element_type(&self) -> ElementType {
        match self {
            Segment::Value(segment) => segment.element_type(),
            Segment::Dictionary(segment) => segment.element_type(),
            Segment::Reference(segment) => segment.element_type(),
        }
    }

    /// Read the value at `i` as a runtime value.
    ///
    /// Panics if `i` is past the end.
    pub fn value_at(&self, i: usize) -> Value {
        match self {
            Segment::Value(segment) => segment.value_at(i),
            Segment::Dictionary(segment) => segment.value_at(i),
            Segment::Reference(segment) => segment.value_at(i),
        }
    }

    /// Number of rows in the segment.
    pub fn len(&self) -> usize {
        match self {
            Segment::Value(segment) => segment.len(),
            Segment::Dictionary(segment) => segment.len(),
            Segment::Reference(segment) => segment.len(),
        }
    }

    /// Whether the segment holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a value. Only value segments are mutable; dictionary and
    /// reference segments fail with [`Error::ImmutableSegment`].
    pub fn append(&mut self, value: &Value) -> Result<(), Error> {
        match self {
            Segment::Value(segment) => segment.append(value),
            Segment::Dictionary(_) | Segment::Reference(_) => Err(Error::ImmutableSegment),
        }
    }
}
