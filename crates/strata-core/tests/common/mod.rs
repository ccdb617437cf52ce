//! Shared helpers for comparing result tables.

use strata_core::{ElementType, Table, Value};

/// A table flattened to row-major values, chunk by chunk.
pub type Matrix = Vec<Vec<Value>>;

/// Flatten a table into a row-major matrix of runtime values.
pub fn table_to_matrix(table: &Table) -> Matrix {
    let mut matrix = Vec::with_capacity(table.row_count() as usize);

    for chunk_id in 0..table.chunk_count() {
        let chunk = table.get_chunk(chunk_id);
        for offset in 0..chunk.len() {
            let mut row = Vec::with_capacity(table.column_count() as usize);
            for column_id in 0..table.column_count() {
                row.push(chunk.get_segment(column_id).value_at(offset));
            }
            matrix.push(row);
        }
    }

    matrix
}

fn types_equivalent(left: ElementType, right: ElementType, strict_types: bool) -> bool {
    if strict_types {
        return left == right;
    }
    // int/long and float/double form equivalence classes.
    let class = |element_type: ElementType| match element_type {
        ElementType::Int32 | ElementType::Int64 => ElementType::Int64,
        ElementType::Float32 | ElementType::Float64 => ElementType::Float64,
        ElementType::String => ElementType::String,
    };
    class(left) == class(right)
}

fn values_equivalent(left: &Value, right: &Value, strict_types: bool) -> bool {
    if strict_types {
        return left == right;
    }
    match (left, right) {
        (Value::String(a), Value::String(b)) => a == b,
        (a, b) if a.element_type().is_numeric() && b.element_type().is_numeric() => {
            match (a.cast_to(ElementType::Float64), b.cast_to(ElementType::Float64)) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            }
        }
        _ => false,
    }
}

fn row_key(row: &[Value]) -> String {
    row.iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join("\u{1f}")
}

/// Assert that two tables hold the same schema and the same rows.
///
/// With `order_sensitive` unset, rows are compared as multisets. With
/// `strict_types` unset, int/long and float/double columns compare as
/// equivalent and numeric values compare by magnitude.
pub fn assert_tables_eq(
    left: &Table,
    right: &Table,
    order_sensitive: bool,
    strict_types: bool,
) {
    assert_eq!(
        left.column_count(),
        right.column_count(),
        "column counts differ"
    );
    for column_id in 0..left.column_count() {
        assert_eq!(
            left.column_name(column_id),
            right.column_name(column_id),
            "column {column_id} is named differently"
        );
        assert!(
            types_equivalent(
                left.column_type(column_id),
                right.column_type(column_id),
                strict_types
            ),
            "column {column_id} types differ: {} vs {}",
            left.column_type(column_id),
            right.column_type(column_id)
        );
    }

    assert_eq!(left.row_count(), right.row_count(), "row counts differ");

    let mut left_rows = table_to_matrix(left);
    let mut right_rows = table_to_matrix(right);
    if !order_sensitive {
        left_rows.sort_by_key(|row| row_key(row));
        right_rows.sort_by_key(|row| row_key(row));
    }

    for (row_index, (left_row, right_row)) in left_rows.iter().zip(&right_rows).enumerate() {
        for (left_value, right_value) in left_row.iter().zip(right_row) {
            assert!(
                values_equivalent(left_value, right_value, strict_types),
                "row {row_index} differs: {left_row:?} vs {right_row:?}"
            );
        }
    }
}
