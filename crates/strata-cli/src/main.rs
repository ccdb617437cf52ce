//! Strata demo driver.
//!
//! Builds a small in-memory movie table, optionally dictionary-compresses
//! its sealed chunks, runs a table scan, and prints registry summaries and
//! the matching rows.

use std::sync::Arc;

use clap::{Parser, ValueEnum};

use strata_core::{
    ElementType, Operator, ScanType, Table, TableRegistry, TableScan, TableWrapper, Value,
};

/// Strata demo driver
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(version, about = "Strata columnar engine demo driver")]
struct Args {
    /// Rows to generate
    #[arg(long, default_value_t = 1000)]
    rows: u32,

    /// Target chunk size (0 = one unbounded chunk)
    #[arg(long, default_value_t = 100)]
    chunk_size: u32,

    /// Dictionary-compress every sealed chunk before scanning
    #[arg(long)]
    compress: bool,

    /// Column to scan
    #[arg(long, default_value = "year")]
    column: String,

    /// Scan predicate
    #[arg(long, value_enum, default_value = "ge")]
    op: Predicate,

    /// Search value, parsed to the scanned column's type
    #[arg(long, default_value = "1990")]
    value: String,

    /// Matching rows to print
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Predicate {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl From<Predicate> for ScanType {
    fn from(predicate: Predicate) -> Self {
        match predicate {
            Predicate::Eq => ScanType::Equals,
            Predicate::Ne => ScanType::NotEquals,
            Predicate::Lt => ScanType::LessThan,
            Predicate::Le => ScanType::LessThanEquals,
            Predicate::Gt => ScanType::GreaterThan,
            Predicate::Ge => ScanType::GreaterThanEquals,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("strata=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = build_movies(args.rows, args.chunk_size)?;

    if args.compress {
        // Every chunk but the tail is sealed; the tail stays appendable.
        for chunk_id in 0..table.chunk_count().saturating_sub(1) {
            table.compress_chunk(chunk_id)?;
        }
    }

    let table = Arc::new(table);
    let registry = TableRegistry::global();
    registry.add_table("movies", Arc::clone(&table))?;

    for summary in registry.summaries() {
        println!(
            "{}: {} columns, {} rows, {} chunks",
            summary.name, summary.column_count, summary.row_count, summary.chunk_count
        );
    }

    let column_id = table.column_id_by_name(&args.column)?;
    let search_value = Value::from(args.value.as_str()).cast_to(table.column_type(column_id))?;

    let mut scan = TableScan::new(
        Box::new(TableWrapper::new(Arc::clone(&table))),
        column_id,
        args.op.into(),
        search_value,
    );
    scan.execute()?;
    let result = scan
        .output()
        .expect("an executed operator caches its output");

    println!(
        "scan {} {:?} {} matched {} of {} rows",
        args.column,
        ScanType::from(args.op),
        args.value,
        result.row_count(),
        table.row_count()
    );

    print_rows(&result, args.limit);
    Ok(())
}

/// A deterministic movie table: title, year, and rating columns.
fn build_movies(rows: u32, chunk_size: u32) -> Result<Table, strata_core::Error> {
    let mut table = Table::new(chunk_size);
    table.add_column("title", ElementType::String)?;
    table.add_column("year", ElementType::Int32)?;
    table.add_column("rating", ElementType::Float64)?;

    for i in 0..rows {
        let year = 1950 + (i * 7 % 75) as i32;
        let rating = f64::from(i % 100) / 10.0;
        table.append(&[
            Value::from(format!("Movie {i}")),
            Value::Int32(year),
            Value::Float64(rating),
        ])?;
    }

    Ok(table)
}

fn print_rows(table: &Arc<Table>, limit: usize) {
    let mut printed = 0;
    'chunks: for chunk_id in 0..table.chunk_count() {
        let chunk = table.get_chunk(chunk_id);
        for offset in 0..chunk.len() {
            if printed == limit {
                println!("...");
                break 'chunks;
            }
            let row: Vec<String> = (0..table.column_count())
                .map(|column_id| chunk.get_segment(column_id).value_at(offset).to_string())
                .collect();
            println!("  {}", row.join(" | "));
            printed += 1;
        }
    }
}
