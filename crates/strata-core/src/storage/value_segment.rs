//! Append-only uncompressed column segments.

use crate::error::Error;
use crate::types::ElementType;
use crate::value::{ElementValue, Value};

/// A growable, uncompressed column segment of one element type.
///
/// Incoming values are cast to the segment's element type on append, so a
/// row of mixed-width numerics lands in the declared column types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSegment {
    /// 32-bit signed integers.
    Int32(Vec<i32>),
    /// 64-bit signed integers.
    Int64(Vec<i64>),
    /// 32-bit floats.
    Float32(Vec<f32>),
    /// 64-bit floats.
    Float64(Vec<f64>),
    /// UTF-8 strings.
    String(Vec<String>),
}

impl ValueSegment {
    /// Create an empty segment of the given element type.
    pub fn new(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Int32 => ValueSegment::Int32(Vec::new()),
            ElementType::Int64 => ValueSegment::Int64(Vec::new()),
            ElementType::Float32 => ValueSegment::Float32(Vec::new()),
            ElementType::Float64 => ValueSegment::Float64(Vec::new()),
            ElementType::String => ValueSegment::String(Vec::new()),
        }
    }

    /// The element type stored in this segment.
    pub fn element_type(&self) -> ElementType {
        match self {
            ValueSegment::Int32(_) => ElementType::Int32,
            ValueSegment::Int64(_) => ElementType::Int64,
            ValueSegment::Float32(_) => ElementType::Float32,
            ValueSegment::Float64(_) => ElementType::Float64,
            ValueSegment::String(_) => ElementType::String,
        }
    }

    /// Cast `value` to this segment's element type and append it.
    pub fn append(&mut self, value: &Value) -> Result<(), Error> {
        match self {
            ValueSegment::Int32(values) => values.push(i32::cast_from(value)?),
            ValueSegment::Int64(values) => values.push(i64::cast_from(value)?),
            ValueSegment::Float32(values) => values.push(f32::cast_from(value)?),
            ValueSegment::Float64(values) => values.push(f64::cast_from(value)?),
            ValueSegment::String(values) => values.push(String::cast_from(value)?),
        }
        Ok(())
    }

    /// Read the value at `i` as a runtime value.
    ///
    /// Operators that care about throughput should take a typed slice via
    /// [`ElementValue::value_slice`] instead. Panics if `i` is past the end.
    pub fn value_at(&self, i: usize) -> Value {
        match self {
            ValueSegment::Int32(values) => Value::Int32(values[i]),
            ValueSegment::Int64(values) => Value::Int64(values[i]),
            ValueSegment::Float32(values) => Value::Float32(values[i]),
            ValueSegment::Float64(values) => Value::Float64(values[i]),
            ValueSegment::String(values) => Value::String(values[i].clone()),
        }
    }

    /// Number of values in the segment.
    pub fn len(&self) -> usize {
        match self {
            ValueSegment::Int32(values) => values.len(),
            ValueSegment::Int64(values) => values.len(),
            ValueSegment::Float32(values) => values.len(),
            ValueSegment::Float64(values) => values.len(),
            ValueSegment::String(values) => values.len(),
        }
    }

    /// Whether the segment holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
