//! The chunked columnar storage layer.
//!
//! Tables partition horizontally into fixed-capacity chunks; each chunk
//! carries one segment per column under one of three encodings (value,
//! dictionary, reference). The registry shares tables by name across the
//! process.

pub mod attribute_vector;
pub mod chunk;
pub mod dictionary_segment;
pub mod reference_segment;
pub mod registry;
pub mod segment;
pub mod table;
pub mod value_segment;

pub use attribute_vector::AttributeVector;
pub use chunk::Chunk;
pub use dictionary_segment::{DictionarySegment, DictionaryValues};
pub use reference_segment::ReferenceSegment;
pub use registry::{TableRegistry, TableSummary};
pub use segment::Segment;
pub use table::Table;
pub use value_segment::ValueSegment;
