//! Runtime values and the typed element domain.
//!
//! `Value` is the tagged union used at operator and storage boundaries: row
//! append, scan search values, and scalar reads out of segments. Inside
//! segments, data is stored as plain typed vectors; the `ElementValue` trait
//! connects the two worlds with checked casts and typed downcasts.

use std::cmp::Ordering;
use std::fmt;

use crate::error::Error;
use crate::storage::dictionary_segment::DictionaryValues;
use crate::storage::ValueSegment;
use crate::types::ElementType;

/// A runtime value of one of the supported element types.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 32-bit floating point.
    Float32(f32),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    String(String),
}

impl Value {
    /// The element type this value carries.
    pub fn element_type(&self) -> ElementType {
        match self {
            Value::Int32(_) => ElementType::Int32,
            Value::Int64(_) => ElementType::Int64,
            Value::Float32(_) => ElementType::Float32,
            Value::Float64(_) => ElementType::Float64,
            Value::String(_) => ElementType::String,
        }
    }

    /// Cast this value to another element type.
    ///
    /// Numeric conversions follow standard truncation/widening; conversions
    /// to and from strings go through the canonical decimal text and fail
    /// with [`Error::TypeMismatch`] when the text does not parse.
    pub fn cast_to(&self, target: ElementType) -> Result<Value, Error> {
        match target {
            ElementType::Int32 => i32::cast_from(self).map(Value::Int32),
            ElementType::Int64 => i64::cast_from(self).map(Value::Int64),
            ElementType::Float32 => f32::cast_from(self).map(Value::Float32),
            ElementType::Float64 => f64::cast_from(self).map(Value::Float64),
            ElementType::String => String::cast_from(self).map(Value::String),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// A concrete element type that can back a column segment.
///
/// Implementations connect a Rust scalar type to its [`ElementType`] tag,
/// define the checked cast out of [`Value`], and provide the typed views
/// into the storage enums that the scan's monomorphic loops read.
pub trait ElementValue: Clone + PartialOrd + Sized {
    /// The tag this type carries at operator boundaries.
    const ELEMENT_TYPE: ElementType;

    /// Cast a runtime value into this type.
    fn cast_from(value: &Value) -> Result<Self, Error>;

    /// Total ordering used for dictionary sorting and binary search.
    fn total_order(&self, other: &Self) -> Ordering;

    /// Typed view into a value segment, if the segment holds this type.
    fn value_slice(segment: &ValueSegment) -> Option<&[Self]>;

    /// Typed view into a dictionary payload, if it holds this type.
    fn dictionary_slice(values: &DictionaryValues) -> Option<&[Self]>;
}

fn mismatch<T: ElementValue>(value: &Value) -> Error {
    Error::TypeMismatch {
        from: value.element_type(),
        to: T::ELEMENT_TYPE,
    }
}

impl ElementValue for i32 {
    const ELEMENT_TYPE: ElementType = ElementType::Int32;

    fn cast_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Int32(v) => Ok(*v),
            Value::Int64(v) => Ok(*v as i32),
            Value::Float32(v) => Ok(*v as i32),
            Value::Float64(v) => Ok(*v as i32),
            Value::String(v) => v.parse().map_err(|_| mismatch::<Self>(value)),
        }
    }

    fn total_order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn value_slice(segment: &ValueSegment) -> Option<&[Self]> {
        match segment {
            ValueSegment::Int32(values) => Some(values),
            _ => None,
        }
    }

    fn dictionary_slice(values: &DictionaryValues) -> Option<&[Self]> {
        match values {
            DictionaryValues::Int32(values) => Some(values),
            _ => None,
        }
    }
}

impl ElementValue for i64 {
    const ELEMENT_TYPE: ElementType = ElementType::Int64;

    fn cast_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Int32(v) => Ok(*v as i64),
            Value::Int64(v) => Ok(*v),
            Value::Float32(v) => Ok(*v as i64),
            Value::Float64(v) => Ok(*v as i64),
            Value::String(v) => v.parse().map_err(|_| mismatch::<Self>(value)),
        }
    }

    fn total_order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn value_slice(segment: &ValueSegment) -> Option<&[Self]> {
        match segment {
            ValueSegment::Int64(values) => Some(values),
            _ => None,
        }
    }

    fn dictionary_slice(values: &DictionaryValues) -> Option<&[Self]> {
        match values {
            DictionaryValues::Int64(values) => Some(values),
            _ => None,
        }
    }
}

impl ElementValue for f32 {
    const ELEMENT_TYPE: ElementType = ElementType::Float32;

    fn cast_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Int32(v) => Ok(*v as f32),
            Value::Int64(v) => Ok(*v as f32),
            Value::Float32(v) => Ok(*v),
            Value::Float64(v) => Ok(*v as f32),
            Value::String(v) => v.parse().map_err(|_| mismatch::<Self>(value)),
        }
    }

    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn value_slice(segment: &ValueSegment) -> Option<&[Self]> {
        match segment {
            ValueSegment::Float32(values) => Some(values),
            _ => None,
        }
    }

    fn dictionary_slice(values: &DictionaryValues) -> Option<&[Self]> {
        match values {
            DictionaryValues::Float32(values) => Some(values),
            _ => None,
        }
    }
}

impl ElementValue for f64 {
    const ELEMENT_TYPE: ElementType = ElementType::Float64;

    fn cast_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Int32(v) => Ok(*v as f64),
            Value::Int64(v) => Ok(*v as f64),
            Value::Float32(v) => Ok(*v as f64),
            Value::Float64(v) => Ok(*v),
            Value::String(v) => v.parse().map_err(|_| mismatch::<Self>(value)),
        }
    }

    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn value_slice(segment: &ValueSegment) -> Option<&[Self]> {
        match segment {
            ValueSegment::Float64(values) => Some(values),
            _ => None,
        }
    }

    fn dictionary_slice(values: &DictionaryValues) -> Option<&[Self]> {
        match values {
            DictionaryValues::Float64(values) => Some(values),
            _ => None,
        }
    }
}

impl ElementValue for String {
    const ELEMENT_TYPE: ElementType = ElementType::String;

    fn cast_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(v) => Ok(v.clone()),
            other => Ok(other.to_string()),
        }
    }

    fn total_order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn value_slice(segment: &ValueSegment) -> Option<&[Self]> {
        match segment {
            ValueSegment::String(values) => Some(values),
            _ => None,
        }
    }

    fn dictionary_slice(values: &DictionaryValues) -> Option<&[Self]> {
        match values {
            DictionaryValues::String(values) => Some(values),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_of_value() {
        assert_eq!(Value::Int32(1).element_type(), ElementType::Int32);
        assert_eq!(Value::Float64(1.0).element_type(), ElementType::Float64);
        assert_eq!(Value::from("x").element_type(), ElementType::String);
    }

    #[test]
    fn test_numeric_casts() {
        assert_eq!(i64::cast_from(&Value::Int32(42)), Ok(42i64));
        assert_eq!(i32::cast_from(&Value::Int64(-7)), Ok(-7i32));
        assert_eq!(f64::cast_from(&Value::Int32(3)), Ok(3.0));
        assert_eq!(i32::cast_from(&Value::Float64(3.9)), Ok(3));
    }

    #[test]
    fn test_string_casts() {
        assert_eq!(String::cast_from(&Value::Int32(42)), Ok("42".to_string()));
        assert_eq!(i32::cast_from(&Value::from("42")), Ok(42));
        assert_eq!(f64::cast_from(&Value::from("2.5")), Ok(2.5));

        // A float's canonical text parses back to the same value.
        let text = String::cast_from(&Value::Float64(0.1)).unwrap();
        assert_eq!(f64::cast_from(&Value::String(text)), Ok(0.1));
    }

    #[test]
    fn test_unparseable_string_fails() {
        assert_eq!(
            i32::cast_from(&Value::from("not a number")),
            Err(Error::TypeMismatch {
                from: ElementType::String,
                to: ElementType::Int32,
            })
        );
    }

    #[test]
    fn test_cast_to_dispatches_on_target() {
        assert_eq!(
            Value::Int32(5).cast_to(ElementType::Int64),
            Ok(Value::Int64(5))
        );
        assert_eq!(
            Value::from("1.5").cast_to(ElementType::Float32),
            Ok(Value::Float32(1.5))
        );
        assert!(Value::from("oops").cast_to(ElementType::Float64).is_err());
    }

    #[test]
    fn test_display_is_decimal() {
        assert_eq!(Value::Int64(-3).to_string(), "-3");
        assert_eq!(Value::Float64(2.5).to_string(), "2.5");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }
}
