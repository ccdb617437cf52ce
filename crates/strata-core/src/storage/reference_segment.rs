//! Reference segments: position-list projections over a base table.

use std::sync::Arc;

use crate::storage::Table;
use crate::types::{ColumnId, ElementType, PosList};
use crate::value::Value;

/// A column segment that owns no values of its own.
///
/// Reads are redirected through a shared position list into one column of a
/// referenced base table. Every reference segment of a scan result shares a
/// single position list, so the result table costs one row-id sequence no
/// matter how many columns it projects.
#[derive(Debug, Clone)]
pub struct ReferenceSegment {
    /// The table the positions point into. Always a base table, never
    /// itself made of reference segments.
    referenced_table: Arc<Table>,
    /// The projected column in the referenced table.
    referenced_column: ColumnId,
    /// Shared row identifiers, published read-only.
    positions: Arc<PosList>,
}

impl ReferenceSegment {
    /// Create a projection of `positions` over one column of a base table.
    pub fn new(
        referenced_table: Arc<Table>,
        referenced_column: ColumnId,
        positions: Arc<PosList>,
    ) -> Self {
        Self {
            referenced_table,
            referenced_column,
            positions,
        }
    }

    /// The element type of the projected column.
    pub fn element_type(&self) -> ElementType {
        self.referenced_table.column_type(self.referenced_column)
    }

    /// Read the value at `i` by chasing the position list into the
    /// referenced table.
    ///
    /// Panics if `i` is past the end of the position list.
    pub fn value_at(&self, i: usize) -> Value {
        let row_id = self.positions[i];
        let chunk = self.referenced_table.get_chunk(row_id.chunk_id);
        chunk
            .get_segment(self.referenced_column)
            .value_at(row_id.chunk_offset as usize)
    }

    /// Number of projected rows.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the projection is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The shared position list.
    pub fn pos_list(&self) -> &Arc<PosList> {
        &self.positions
    }

    /// The referenced base table.
    pub fn referenced_table(&self) -> &Arc<Table> {
        &self.referenced_table
    }

    /// The projected column index.
    pub fn referenced_column(&self) -> ColumnId {
        self.referenced_column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ElementType, RowId};

    fn base_table() -> Arc<Table> {
        let mut table = Table::new(2);
        table.add_column("a", ElementType::Int32).unwrap();
        table.add_column("b", ElementType::String).unwrap();
        for i in 0..5 {
            table
                .append(&[Value::Int32(i * 10), Value::from(format!("row{i}"))])
                .unwrap();
        }
        Arc::new(table)
    }

    #[test]
    fn test_reads_follow_positions() {
        let table = base_table();
        let positions = Arc::new(vec![RowId::new(1, 1), RowId::new(0, 0), RowId::new(2, 0)]);
        let segment = ReferenceSegment::new(table.clone(), 0, positions.clone());

        assert_eq!(segment.len(), 3);
        assert_eq!(segment.value_at(0), Value::Int32(30));
        assert_eq!(segment.value_at(1), Value::Int32(0));
        assert_eq!(segment.value_at(2), Value::Int32(40));

        let names = ReferenceSegment::new(table, 1, positions);
        assert_eq!(names.value_at(0), Value::from("row3"));
        assert_eq!(names.element_type(), ElementType::String);
    }

    #[test]
    fn test_shares_position_list() {
        let table = base_table();
        let positions = Arc::new(vec![RowId::new(0, 0)]);
        let first = ReferenceSegment::new(table.clone(), 0, positions.clone());
        let second = ReferenceSegment::new(table, 1, positions.clone());

        assert!(Arc::ptr_eq(first.pos_list(), &positions));
        assert!(Arc::ptr_eq(second.pos_list(), &positions));
    }
}
