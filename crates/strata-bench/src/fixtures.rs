//! Table builders shared by the benchmark suites.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use strata_core::{ElementType, Operator, Table, TableWrapper, Value};

/// Deterministic seed so runs compare like for like.
const SEED: u64 = 0x5eed;

/// Build a single-column int table of `chunks` chunks with `rows_per_chunk`
/// rows each, values drawn from `[0, unique_values)`.
///
/// With `compress` set, every chunk but the tail is dictionary-encoded,
/// mirroring a table under steady append load.
pub fn int_table(
    chunks: u32,
    rows_per_chunk: u32,
    unique_values: i32,
    compress: bool,
) -> Arc<Table> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut table = Table::new(rows_per_chunk);
    table
        .add_column("n", ElementType::Int32)
        .expect("empty table accepts columns");

    for _ in 0..chunks * rows_per_chunk {
        let value = rng.gen_range(0..unique_values);
        table
            .append(&[Value::Int32(value)])
            .expect("arity matches the schema");
    }

    if compress {
        for chunk_id in 0..table.chunk_count().saturating_sub(1) {
            table
                .compress_chunk(chunk_id)
                .expect("value chunks compress");
        }
    }

    Arc::new(table)
}

/// Wrap a table in an executed table wrapper, ready to feed a scan.
pub fn wrapped(table: Arc<Table>) -> Box<TableWrapper> {
    let mut wrapper = TableWrapper::new(table);
    wrapper.execute().expect("table wrapper execution");
    Box::new(wrapper)
}
