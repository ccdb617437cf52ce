//! Chunked columnar tables.

use tracing::debug;

use crate::error::Error;
use crate::storage::{Chunk, DictionarySegment, Segment, ValueSegment};
use crate::types::{ChunkId, ColumnId, ElementType};
use crate::value::Value;

/// An in-memory table: a column schema and an ordered sequence of chunks.
///
/// Rows are appended into the tail chunk; when the tail reaches the target
/// chunk size a fresh chunk is grown from the schema. Sealed chunks can be
/// dictionary-compressed in place. Mutation happens through `&mut Table`;
/// wrapping the table in an `Arc` to hand it to an operator or the registry
/// freezes it for the rest of its life.
#[derive(Debug)]
pub struct Table {
    column_names: Vec<String>,
    column_types: Vec<ElementType>,
    chunks: Vec<Chunk>,
    target_chunk_size: u32,
}

impl Table {
    /// Create an empty table. A `target_chunk_size` of zero means a single
    /// unbounded chunk.
    pub fn new(target_chunk_size: u32) -> Self {
        Self {
            column_names: Vec::new(),
            column_types: Vec::new(),
            chunks: vec![Chunk::new()],
            target_chunk_size,
        }
    }

    /// Append a column to the schema without touching any chunk.
    ///
    /// Until matching segments are added (by [`Table::emplace_chunk`] or by
    /// building chunks externally), the table is not valid for row appends;
    /// the arity check at the chunk boundary rejects them.
    pub fn add_column_definition(
        &mut self,
        name: impl Into<String>,
        element_type: ElementType,
    ) {
        let name = name.into();
        debug_assert!(
            !self.column_names.contains(&name),
            "column {name} already defined"
        );
        self.column_names.push(name);
        self.column_types.push(element_type);
    }

    /// Add a column to the schema and a fresh value segment to every chunk.
    ///
    /// Fails with [`Error::NonEmptyAddColumn`] once the table holds rows.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        element_type: ElementType,
    ) -> Result<(), Error> {
        let name = name.into();
        if self.row_count() > 0 {
            return Err(Error::NonEmptyAddColumn { name });
        }

        self.add_column_definition(name, element_type);
        for chunk in &mut self.chunks {
            chunk.add_segment(Segment::Value(ValueSegment::new(element_type)));
        }
        Ok(())
    }

    /// Append one row, growing a new tail chunk first when the current tail
    /// is at capacity.
    pub fn append(&mut self, row: &[Value]) -> Result<(), Error> {
        if self.target_chunk_size > 0
            && self.tail_chunk().len() >= self.target_chunk_size as usize
        {
            self.create_new_chunk();
        }

        self.chunks
            .last_mut()
            .expect("a table always holds at least one chunk")
            .append(row)
    }

    /// Move a fully-built chunk into the table.
    ///
    /// Replaces the initial chunk while the table is still empty of
    /// segments; otherwise the chunk is appended.
    pub fn emplace_chunk(&mut self, chunk: Chunk) {
        if self.chunks.len() == 1 && self.chunks[0].column_count() == 0 {
            self.chunks[0] = chunk;
        } else {
            self.chunks.push(chunk);
        }
    }

    fn create_new_chunk(&mut self) {
        let mut chunk = Chunk::new();
        for element_type in &self.column_types {
            chunk.add_segment(Segment::Value(ValueSegment::new(*element_type)));
        }
        self.chunks.push(chunk);
    }

    fn tail_chunk(&self) -> &Chunk {
        self.chunks
            .last()
            .expect("a table always holds at least one chunk")
    }

    /// Replace every segment of a chunk with its dictionary encoding.
    ///
    /// The chunk accepts no further appends afterwards. Fails with
    /// [`Error::ImmutableSegment`] when a segment is not a value segment,
    /// and with [`Error::DictionaryOverflow`] when a column's distinct
    /// values exceed the widest attribute vector. Panics if `chunk_id` is
    /// not a valid chunk index.
    pub fn compress_chunk(&mut self, chunk_id: ChunkId) -> Result<(), Error> {
        let chunk = &self.chunks[chunk_id as usize];

        let mut compressed = Vec::with_capacity(chunk.column_count() as usize);
        for column_id in 0..chunk.column_count() {
            match chunk.get_segment(column_id) {
                Segment::Value(segment) => {
                    compressed.push(DictionarySegment::from_value_segment(segment)?);
                }
                Segment::Dictionary(_) | Segment::Reference(_) => {
                    return Err(Error::ImmutableSegment);
                }
            }
        }

        let chunk = &mut self.chunks[chunk_id as usize];
        for (column_id, segment) in compressed.into_iter().enumerate() {
            debug!(
                chunk_id,
                column_id,
                unique_values = segment.unique_value_count(),
                width = segment.attribute_vector().width(),
                "dictionary-compressed segment"
            );
            chunk.replace_segment(column_id as ColumnId, Segment::Dictionary(segment));
        }

        Ok(())
    }

    /// Number of columns in the schema.
    pub fn column_count(&self) -> u16 {
        self.column_names.len() as u16
    }

    /// Total row count: the sum of all chunk sizes.
    pub fn row_count(&self) -> u64 {
        self.chunks.iter().map(|chunk| chunk.len() as u64).sum()
    }

    /// Number of chunks.
    pub fn chunk_count(&self) -> ChunkId {
        self.chunks.len() as ChunkId
    }

    /// The configured target chunk size (zero for unbounded).
    pub fn target_chunk_size(&self) -> u32 {
        self.target_chunk_size
    }

    /// All column names, in schema order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// The name of column `column_id`.
    ///
    /// Panics if the column does not exist.
    pub fn column_name(&self, column_id: ColumnId) -> &str {
        &self.column_names[column_id as usize]
    }

    /// The element type of column `column_id`.
    ///
    /// Panics if the column does not exist.
    pub fn column_type(&self, column_id: ColumnId) -> ElementType {
        self.column_types[column_id as usize]
    }

    /// Look a column up by name.
    pub fn column_id_by_name(&self, name: &str) -> Result<ColumnId, Error> {
        self.column_names
            .iter()
            .position(|column| column == name)
            .map(|index| index as ColumnId)
            .ok_or_else(|| Error::UnknownColumn {
                name: name.to_string(),
            })
    }

    /// The chunk at `chunk_id`.
    ///
    /// Panics if the chunk does not exist.
    pub fn get_chunk(&self, chunk_id: ChunkId) -> &Chunk {
        &self.chunks[chunk_id as usize]
    }
}
