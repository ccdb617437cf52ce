//! The predicate-driven table scan.
//!
//! The scan walks every chunk of its input table, dispatches once per
//! chunk on the segment encoding, and collects matching row identifiers
//! into one shared position list. The result is a table with the input's
//! schema and a single chunk of reference segments over the scanned base
//! table.
//!
//! Dictionary chunks never compare actual values per row: the search value
//! is reduced to a dictionary index with one binary search, and the
//! attribute vector is filtered with plain integer comparisons in a loop
//! monomorphised per vector width.

use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::operators::Operator;
use crate::storage::{
    AttributeVector, Chunk, DictionarySegment, ReferenceSegment, Segment, Table, ValueSegment,
};
use crate::types::{
    ChunkId, ChunkOffset, ColumnId, ElementType, PosList, RowId, ScanType, INVALID_VALUE_ID,
};
use crate::value::{ElementValue, Value};

/// Scans one column of the input operator's table for rows matching
/// `scan_type` against `search_value`.
pub struct TableScan {
    input: Box<dyn Operator>,
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: Value,
    output: Option<Arc<Table>>,
}

impl TableScan {
    /// Create a scan over the output of `input`.
    pub fn new(
        input: Box<dyn Operator>,
        column_id: ColumnId,
        scan_type: ScanType,
        search_value: Value,
    ) -> Self {
        Self {
            input,
            column_id,
            scan_type,
            search_value,
            output: None,
        }
    }

    /// The scanned column.
    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// The comparison predicate.
    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    /// The search value.
    pub fn search_value(&self) -> &Value {
        &self.search_value
    }

    fn execute_scan(&mut self) -> Result<Arc<Table>, Error> {
        self.input.execute()?;
        let table = self
            .input
            .output()
            .expect("input operator caches its output after execute");

        let column_type = table.column_type(self.column_id);
        if self.search_value.element_type() != column_type {
            return Err(Error::TypeMismatch {
                from: self.search_value.element_type(),
                to: column_type,
            });
        }

        match column_type {
            ElementType::Int32 => self.scan_table::<i32>(&table),
            ElementType::Int64 => self.scan_table::<i64>(&table),
            ElementType::Float32 => self.scan_table::<f32>(&table),
            ElementType::Float64 => self.scan_table::<f64>(&table),
            ElementType::String => self.scan_table::<String>(&table),
        }
    }

    fn scan_table<T: ElementValue>(&self, table: &Arc<Table>) -> Result<Arc<Table>, Error> {
        let search_value = T::cast_from(&self.search_value)?;
        let mut positions = PosList::new();

        // Reference inputs are unwrapped one level: the result points at
        // the base table the input's reference segments point at, so a
        // chain of scans never stacks indirections.
        let mut base_table: Option<Arc<Table>> = None;

        for chunk_id in 0..table.chunk_count() {
            let chunk = table.get_chunk(chunk_id);
            match chunk.get_segment(self.column_id) {
                Segment::Value(segment) => {
                    self.scan_value_segment::<T>(segment, chunk_id, &search_value, &mut positions)?;
                }
                Segment::Dictionary(segment) => {
                    self.scan_dictionary_segment::<T>(
                        segment,
                        chunk_id,
                        &search_value,
                        &mut positions,
                    )?;
                }
                Segment::Reference(segment) => {
                    match &base_table {
                        None => base_table = Some(Arc::clone(segment.referenced_table())),
                        Some(base) => {
                            if !Arc::ptr_eq(base, segment.referenced_table()) {
                                return Err(Error::HeterogeneousReferenceInput);
                            }
                        }
                    }
                    self.scan_reference_segment::<T>(segment, &search_value, &mut positions)?;
                }
            }
        }

        let base_table = base_table.unwrap_or_else(|| Arc::clone(table));
        debug!(
            column_id = self.column_id,
            matches = positions.len(),
            chunks = table.chunk_count(),
            "table scan complete"
        );

        Ok(Arc::new(Self::build_result(table, base_table, positions)))
    }

    /// Assemble the result: the input's schema over one chunk of reference
    /// segments, all sharing the freshly materialised position list.
    fn build_result(input: &Table, base_table: Arc<Table>, positions: PosList) -> Table {
        let positions = Arc::new(positions);
        let mut result = Table::new(0);
        let mut chunk = Chunk::new();

        for column_id in 0..input.column_count() {
            result.add_column_definition(
                input.column_name(column_id),
                input.column_type(column_id),
            );
            chunk.add_segment(Segment::Reference(ReferenceSegment::new(
                Arc::clone(&base_table),
                column_id,
                Arc::clone(&positions),
            )));
        }

        result.emplace_chunk(chunk);
        result
    }

    fn scan_value_segment<T: ElementValue>(
        &self,
        segment: &ValueSegment,
        chunk_id: ChunkId,
        search_value: &T,
        positions: &mut PosList,
    ) -> Result<(), Error> {
        let values = T::value_slice(segment).ok_or(Error::TypeMismatch {
            from: segment.element_type(),
            to: T::ELEMENT_TYPE,
        })?;

        for (offset, value) in values.iter().enumerate() {
            if self.scan_type.matches(value, search_value) {
                positions.push(RowId::new(chunk_id, offset as ChunkOffset));
            }
        }
        Ok(())
    }

    /// The dictionary fast-path: one binary search reduces the predicate to
    /// attribute-vector comparisons against `value_id`, then one
    /// width-monomorphic pass filters the vector.
    fn scan_dictionary_segment<T: ElementValue>(
        &self,
        segment: &DictionarySegment,
        chunk_id: ChunkId,
        search_value: &T,
        positions: &mut PosList,
    ) -> Result<(), Error> {
        let dictionary = segment.typed_dictionary::<T>().ok_or(Error::TypeMismatch {
            from: segment.element_type(),
            to: T::ELEMENT_TYPE,
        })?;

        let value_id = segment.lower_bound(&self.search_value)?;
        let contains =
            value_id != INVALID_VALUE_ID && dictionary[value_id as usize] == *search_value;

        // The sentinel narrows to all-ones at every width and every stored
        // id stays strictly below it, so truncating the search id keeps the
        // comparisons exact.
        match segment.attribute_vector().as_ref() {
            AttributeVector::U8(ids) => {
                self.emit_matches(ids, value_id as u8, contains, chunk_id, positions);
            }
            AttributeVector::U16(ids) => {
                self.emit_matches(ids, value_id as u16, contains, chunk_id, positions);
            }
            AttributeVector::U32(ids) => {
                self.emit_matches(ids, value_id, contains, chunk_id, positions);
            }
        }
        Ok(())
    }

    /// Emit row ids whose attribute-vector entry satisfies the predicate,
    /// rewritten in terms of the search value's dictionary index.
    ///
    /// When the dictionary does not contain the search value, `value_id`
    /// points at the first greater entry, which folds the missing-value
    /// cases into shifted comparisons: nothing can be equal, `<=` becomes
    /// `<`, and `>` becomes `>=`.
    fn emit_matches<I: Copy + Ord>(
        &self,
        ids: &[I],
        value_id: I,
        contains: bool,
        chunk_id: ChunkId,
        positions: &mut PosList,
    ) {
        match (self.scan_type, contains) {
            (ScanType::Equals, true) => {
                emit_where(ids, chunk_id, positions, |id| id == value_id);
            }
            (ScanType::Equals, false) => {}
            (ScanType::NotEquals, true) => {
                emit_where(ids, chunk_id, positions, |id| id != value_id);
            }
            (ScanType::NotEquals, false) => emit_all(ids.len(), chunk_id, positions),
            (ScanType::LessThan, _) => {
                emit_where(ids, chunk_id, positions, |id| id < value_id);
            }
            (ScanType::LessThanEquals, true) => {
                emit_where(ids, chunk_id, positions, |id| id <= value_id);
            }
            (ScanType::LessThanEquals, false) => {
                emit_where(ids, chunk_id, positions, |id| id < value_id);
            }
            (ScanType::GreaterThan, true) => {
                emit_where(ids, chunk_id, positions, |id| id > value_id);
            }
            (ScanType::GreaterThan, false) => {
                emit_where(ids, chunk_id, positions, |id| id >= value_id);
            }
            (ScanType::GreaterThanEquals, _) => {
                emit_where(ids, chunk_id, positions, |id| id >= value_id);
            }
        }
    }

    /// Re-evaluate the predicate over the rows a reference segment projects,
    /// appending the original row ids untouched.
    ///
    /// Positions are walked in runs over the same source chunk so each run
    /// resolves its segment once.
    fn scan_reference_segment<T: ElementValue>(
        &self,
        segment: &ReferenceSegment,
        search_value: &T,
        positions: &mut PosList,
    ) -> Result<(), Error> {
        let table = segment.referenced_table();
        let column_id = segment.referenced_column();
        let pos_list = segment.pos_list();

        let mut run_start = 0;
        while run_start < pos_list.len() {
            let chunk_id = pos_list[run_start].chunk_id;
            let mut run_end = run_start + 1;
            while run_end < pos_list.len() && pos_list[run_end].chunk_id == chunk_id {
                run_end += 1;
            }
            let run = &pos_list[run_start..run_end];

            match table.get_chunk(chunk_id).get_segment(column_id) {
                Segment::Value(source) => {
                    let values = T::value_slice(source).ok_or(Error::TypeMismatch {
                        from: source.element_type(),
                        to: T::ELEMENT_TYPE,
                    })?;
                    for row_id in run {
                        if self
                            .scan_type
                            .matches(&values[row_id.chunk_offset as usize], search_value)
                        {
                            positions.push(*row_id);
                        }
                    }
                }
                Segment::Dictionary(source) => {
                    let dictionary =
                        source.typed_dictionary::<T>().ok_or(Error::TypeMismatch {
                            from: source.element_type(),
                            to: T::ELEMENT_TYPE,
                        })?;
                    let attribute_vector = source.attribute_vector();
                    for row_id in run {
                        let id = attribute_vector.get(row_id.chunk_offset as usize);
                        if self
                            .scan_type
                            .matches(&dictionary[id as usize], search_value)
                        {
                            positions.push(*row_id);
                        }
                    }
                }
                Segment::Reference(_) => {
                    unreachable!("reference segments always point at a base table")
                }
            }

            run_start = run_end;
        }
        Ok(())
    }
}

impl Operator for TableScan {
    fn execute(&mut self) -> Result<(), Error> {
        if self.output.is_none() {
            self.output = Some(self.execute_scan()?);
        }
        Ok(())
    }

    fn output(&self) -> Option<Arc<Table>> {
        self.output.clone()
    }
}

fn emit_where<I: Copy>(
    ids: &[I],
    chunk_id: ChunkId,
    positions: &mut PosList,
    predicate: impl Fn(I) -> bool,
) {
    for (offset, id) in ids.iter().enumerate() {
        if predicate(*id) {
            positions.push(RowId::new(chunk_id, offset as ChunkOffset));
        }
    }
}

fn emit_all(len: usize, chunk_id: ChunkId, positions: &mut PosList) {
    positions.reserve(len);
    for offset in 0..len {
        positions.push(RowId::new(chunk_id, offset as ChunkOffset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::TableWrapper;

    fn int_table(target_chunk_size: u32, values: &[i32]) -> Arc<Table> {
        let mut table = Table::new(target_chunk_size);
        table.add_column("a", ElementType::Int32).unwrap();
        for value in values {
            table.append(&[Value::Int32(*value)]).unwrap();
        }
        Arc::new(table)
    }

    fn scan(
        table: Arc<Table>,
        scan_type: ScanType,
        search_value: Value,
    ) -> Result<Arc<Table>, Error> {
        let mut scan = TableScan::new(
            Box::new(TableWrapper::new(table)),
            0,
            scan_type,
            search_value,
        );
        scan.execute()?;
        Ok(scan.output().expect("scan caches its output"))
    }

    fn result_positions(result: &Table) -> Vec<RowId> {
        match result.get_chunk(0).get_segment(0) {
            Segment::Reference(segment) => segment.pos_list().as_ref().clone(),
            other => panic!("scan results hold reference segments, got {other:?}"),
        }
    }

    #[test]
    fn test_value_segment_scan() {
        let table = int_table(0, &[1, 2, 3, 4, 5]);
        let result = scan(table, ScanType::GreaterThan, Value::Int32(3)).unwrap();

        assert_eq!(
            result_positions(&result),
            vec![RowId::new(0, 3), RowId::new(0, 4)]
        );
        assert_eq!(result.row_count(), 2);
    }

    #[test]
    fn test_scan_crosses_chunks_in_order() {
        let table = int_table(2, &[5, 1, 5, 1, 5]);
        let result = scan(table, ScanType::Equals, Value::Int32(5)).unwrap();

        assert_eq!(
            result_positions(&result),
            vec![RowId::new(0, 0), RowId::new(1, 0), RowId::new(2, 0)]
        );
    }

    #[test]
    fn test_search_value_type_must_match_column() {
        let table = int_table(0, &[1, 2, 3]);
        assert_eq!(
            scan(table, ScanType::Equals, Value::Int64(2)).unwrap_err(),
            Error::TypeMismatch {
                from: ElementType::Int64,
                to: ElementType::Int32,
            }
        );
    }

    #[test]
    fn test_result_schema_copies_input() {
        let mut table = Table::new(0);
        table.add_column("id", ElementType::Int32).unwrap();
        table.add_column("label", ElementType::String).unwrap();
        table.append(&[Value::Int32(1), Value::from("x")]).unwrap();
        let table = Arc::new(table);

        let mut scan = TableScan::new(
            Box::new(TableWrapper::new(table)),
            0,
            ScanType::Equals,
            Value::Int32(1),
        );
        scan.execute().unwrap();
        let result = scan.output().unwrap();

        assert_eq!(result.column_names(), &["id", "label"]);
        assert_eq!(result.column_type(1), ElementType::String);
        assert_eq!(result.chunk_count(), 1);
        assert_eq!(result.get_chunk(0).column_count(), 2);
    }

    #[test]
    fn test_accessors() {
        let scan = TableScan::new(
            Box::new(TableWrapper::new(int_table(0, &[]))),
            0,
            ScanType::LessThan,
            Value::Int32(7),
        );
        assert_eq!(scan.column_id(), 0);
        assert_eq!(scan.scan_type(), ScanType::LessThan);
        assert_eq!(scan.search_value(), &Value::Int32(7));
    }
}
