//! Dictionary-encoded column segments.
//!
//! A dictionary segment replaces a value segment with (a) a sorted,
//! duplicate-free dictionary of distinct values and (b) an attribute vector
//! mapping every original row offset to its dictionary index, stored at the
//! narrowest byte width the dictionary size allows. The sorted dictionary
//! turns predicate evaluation into a binary search plus an index
//! comparison, and the fitted width keeps the per-row cost at one small
//! integer.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::Error;
use crate::storage::{AttributeVector, ValueSegment};
use crate::types::{ElementType, ValueId, INVALID_VALUE_ID};
use crate::value::{ElementValue, Value};

/// The sorted distinct values of a dictionary segment, shared read-only.
#[derive(Debug, Clone)]
pub enum DictionaryValues {
    /// 32-bit signed integers.
    Int32(Arc<Vec<i32>>),
    /// 64-bit signed integers.
    Int64(Arc<Vec<i64>>),
    /// 32-bit floats.
    Float32(Arc<Vec<f32>>),
    /// 64-bit floats.
    Float64(Arc<Vec<f64>>),
    /// UTF-8 strings.
    String(Arc<Vec<String>>),
}

impl DictionaryValues {
    /// The element type of the dictionary entries.
    pub fn element_type(&self) -> ElementType {
        match self {
            DictionaryValues::Int32(_) => ElementType::Int32,
            DictionaryValues::Int64(_) => ElementType::Int64,
            DictionaryValues::Float32(_) => ElementType::Float32,
            DictionaryValues::Float64(_) => ElementType::Float64,
            DictionaryValues::String(_) => ElementType::String,
        }
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        match self {
            DictionaryValues::Int32(values) => values.len(),
            DictionaryValues::Int64(values) => values.len(),
            DictionaryValues::Float32(values) => values.len(),
            DictionaryValues::Float64(values) => values.len(),
            DictionaryValues::String(values) => values.len(),
        }
    }

    /// Whether the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the entry at `index` as a runtime value.
    ///
    /// Panics if `index` is past the end.
    pub fn value_at(&self, index: usize) -> Value {
        match self {
            DictionaryValues::Int32(values) => Value::Int32(values[index]),
            DictionaryValues::Int64(values) => Value::Int64(values[index]),
            DictionaryValues::Float32(values) => Value::Float32(values[index]),
            DictionaryValues::Float64(values) => Value::Float64(values[index]),
            DictionaryValues::String(values) => Value::String(values[index].clone()),
        }
    }
}

/// An immutable, dictionary-encoded column segment.
#[derive(Debug, Clone)]
pub struct DictionarySegment {
    /// Sorted distinct values.
    dictionary: DictionaryValues,
    /// Row offset to dictionary index, at fitted width.
    attribute_vector: Arc<AttributeVector>,
}

/// Build the sorted distinct dictionary and the re-encoded attribute
/// vector for one typed value sequence.
fn encode<T: ElementValue>(values: &[T]) -> Result<(Arc<Vec<T>>, AttributeVector), Error> {
    let mut dictionary: Vec<T> = values.to_vec();
    dictionary.sort_by(|a, b| a.total_order(b));
    dictionary.dedup_by(|a, b| a == b);

    let mut attribute_vector = AttributeVector::fitted(dictionary.len(), values.len())?;
    for (row, value) in values.iter().enumerate() {
        match dictionary.binary_search_by(|entry| entry.total_order(value)) {
            Ok(index) => attribute_vector.set(row, index as ValueId),
            Err(_) => unreachable!("value missing from a dictionary built over it"),
        }
    }

    Ok((Arc::new(dictionary), attribute_vector))
}

/// Locate the first dictionary index at or past `value`; `strict` asks for
/// strictly past. Returns the sentinel when no such entry exists.
fn bound_of<T: ElementValue>(dictionary: &[T], value: &T, strict: bool) -> ValueId {
    let index = if strict {
        dictionary.partition_point(|entry| entry.total_order(value) != Ordering::Greater)
    } else {
        dictionary.partition_point(|entry| entry.total_order(value) == Ordering::Less)
    };
    if index == dictionary.len() {
        INVALID_VALUE_ID
    } else {
        index as ValueId
    }
}

impl DictionarySegment {
    /// Dictionary-encode an existing value segment.
    ///
    /// Fails with [`Error::DictionaryOverflow`] when the distinct-value
    /// count exceeds the widest supported attribute vector.
    pub fn from_value_segment(segment: &ValueSegment) -> Result<Self, Error> {
        let (dictionary, attribute_vector) = match segment {
            ValueSegment::Int32(values) => {
                let (dictionary, vector) = encode(values)?;
                (DictionaryValues::Int32(dictionary), vector)
            }
            ValueSegment::Int64(values) => {
                let (dictionary, vector) = encode(values)?;
                (DictionaryValues::Int64(dictionary), vector)
            }
            ValueSegment::Float32(values) => {
                let (dictionary, vector) = encode(values)?;
                (DictionaryValues::Float32(dictionary), vector)
            }
            ValueSegment::Float64(values) => {
                let (dictionary, vector) = encode(values)?;
                (DictionaryValues::Float64(dictionary), vector)
            }
            ValueSegment::String(values) => {
                let (dictionary, vector) = encode(values)?;
                (DictionaryValues::String(dictionary), vector)
            }
        };

        Ok(Self {
            dictionary,
            attribute_vector: Arc::new(attribute_vector),
        })
    }

    /// The element type stored in this segment.
    pub fn element_type(&self) -> ElementType {
        self.dictionary.element_type()
    }

    /// The sorted distinct values.
    pub fn dictionary(&self) -> &DictionaryValues {
        &self.dictionary
    }

    /// Typed view of the dictionary entries, if they hold `T`.
    pub fn typed_dictionary<T: ElementValue>(&self) -> Option<&[T]> {
        T::dictionary_slice(&self.dictionary)
    }

    /// The shared attribute vector.
    pub fn attribute_vector(&self) -> &Arc<AttributeVector> {
        &self.attribute_vector
    }

    /// Number of distinct values.
    pub fn unique_value_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Number of rows in the segment.
    pub fn len(&self) -> usize {
        self.attribute_vector.len()
    }

    /// Whether the segment holds no rows.
    pub fn is_empty(&self) -> bool {
        self.attribute_vector.is_empty()
    }

    /// Read the value at row offset `i` through the dictionary.
    ///
    /// Panics if `i` is past the end.
    pub fn value_at(&self, i: usize) -> Value {
        self.dictionary
            .value_at(self.attribute_vector.get(i) as usize)
    }

    /// The dictionary entry behind `value_id` as a runtime value.
    ///
    /// Panics if `value_id` is not a valid dictionary index.
    pub fn value_of_id(&self, value_id: ValueId) -> Value {
        self.dictionary.value_at(value_id as usize)
    }

    /// First dictionary index whose value is `>=` the search value, or the
    /// sentinel when every entry is smaller.
    ///
    /// The search value is cast to the segment's element type once; a value
    /// that cannot be cast fails with [`Error::TypeMismatch`].
    pub fn lower_bound(&self, value: &Value) -> Result<ValueId, Error> {
        self.bound(value, false)
    }

    /// First dictionary index whose value is `>` the search value, or the
    /// sentinel when every entry is smaller or equal.
    pub fn upper_bound(&self, value: &Value) -> Result<ValueId, Error> {
        self.bound(value, true)
    }

    fn bound(&self, value: &Value, strict: bool) -> Result<ValueId, Error> {
        match &self.dictionary {
            DictionaryValues::Int32(values) => {
                Ok(bound_of(values, &i32::cast_from(value)?, strict))
            }
            DictionaryValues::Int64(values) => {
                Ok(bound_of(values, &i64::cast_from(value)?, strict))
            }
            DictionaryValues::Float32(values) => {
                Ok(bound_of(values, &f32::cast_from(value)?, strict))
            }
            DictionaryValues::Float64(values) => {
                Ok(bound_of(values, &f64::cast_from(value)?, strict))
            }
            DictionaryValues::String(values) => {
                Ok(bound_of(values, &String::cast_from(value)?, strict))
            }
        }
    }
}
