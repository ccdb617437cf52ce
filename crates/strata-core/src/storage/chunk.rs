//! Horizontal table partitions.

use crate::error::Error;
use crate::storage::Segment;
use crate::types::ColumnId;
use crate::value::Value;

/// One horizontal partition of a table: an ordered segment per column.
///
/// Invariant: a chunk is either empty of segments or all its segments have
/// the same length, which is the chunk's row count.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    segments: Vec<Segment>,
}

impl Chunk {
    /// Create a chunk with no segments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment. Callers add all columns before appending rows.
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Append one row, element-wise across the segments.
    ///
    /// Fails with [`Error::ArityMismatch`] unless the row has exactly one
    /// value per segment. Every value is cast to its column's element type
    /// before any segment is touched, so a failed cast leaves the chunk
    /// unchanged.
    pub fn append(&mut self, row: &[Value]) -> Result<(), Error> {
        if row.len() != self.segments.len() {
            return Err(Error::ArityMismatch {
                expected: self.segments.len(),
                actual: row.len(),
            });
        }

        let cast_row: Vec<Value> = row
            .iter()
            .zip(&self.segments)
            .map(|(value, segment)| value.cast_to(segment.element_type()))
            .collect::<Result<_, _>>()?;

        for (value, segment) in cast_row.iter().zip(&mut self.segments) {
            segment.append(value)?;
        }

        Ok(())
    }

    /// The segment of column `column_id`.
    ///
    /// Panics if the column does not exist.
    pub fn get_segment(&self, column_id: ColumnId) -> &Segment {
        &self.segments[column_id as usize]
    }

    /// Number of segments (columns) in this chunk.
    pub fn column_count(&self) -> u16 {
        self.segments.len() as u16
    }

    /// Number of rows: zero without segments, otherwise the length of the
    /// first segment.
    pub fn len(&self) -> usize {
        self.segments.first().map_or(0, Segment::len)
    }

    /// Whether the chunk holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the segment of column `column_id`.
    ///
    /// Used by chunk compression; the replacement must keep the equal-length
    /// invariant. Panics if the column does not exist.
    pub(crate) fn replace_segment(&mut self, column_id: ColumnId, segment: Segment) {
        debug_assert_eq!(segment.len(), self.len());
        self.segments[column_id as usize] = segment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ValueSegment;
    use crate::types::ElementType;

    fn two_column_chunk() -> Chunk {
        let mut chunk = Chunk::new();
        chunk.add_segment(Segment::Value(ValueSegment::new(ElementType::Int32)));
        chunk.add_segment(Segment::Value(ValueSegment::new(ElementType::String)));
        chunk
    }

    #[test]
    fn test_empty_chunk_has_no_rows() {
        assert_eq!(Chunk::new().len(), 0);
        assert_eq!(Chunk::new().column_count(), 0);
    }

    #[test]
    fn test_append_element_wise() {
        let mut chunk = two_column_chunk();
        chunk.append(&[Value::Int32(1), Value::from("one")]).unwrap();
        chunk.append(&[Value::Int32(2), Value::from("two")]).unwrap();

        assert_eq!(chunk.len(), 2);
        assert_eq!(chunk.get_segment(0).value_at(1), Value::Int32(2));
        assert_eq!(chunk.get_segment(1).value_at(0), Value::from("one"));
    }

    #[test]
    fn test_append_arity_mismatch() {
        let mut chunk = two_column_chunk();
        assert_eq!(
            chunk.append(&[Value::Int32(1)]),
            Err(Error::ArityMismatch {
                expected: 2,
                actual: 1,
            })
        );
        assert_eq!(chunk.len(), 0);
    }

    #[test]
    fn test_failed_cast_leaves_chunk_unchanged() {
        let mut chunk = two_column_chunk();
        chunk.append(&[Value::Int32(1), Value::from("one")]).unwrap();

        // The second column accepts anything stringly; break the first.
        assert!(chunk
            .append(&[Value::from("not a number"), Value::from("two")])
            .is_err());

        assert_eq!(chunk.len(), 1);
        assert_eq!(chunk.get_segment(0).len(), chunk.get_segment(1).len());
    }
}
