//! Table scan benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use strata_bench::fixtures;
use strata_core::{Operator, ScanType, TableScan, Value};

fn bench_scan_value_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan/value");

    for rows in [10_000u32, 100_000] {
        let table = fixtures::int_table(4, rows / 4, 1_000, false);
        group.bench_with_input(BenchmarkId::new("ge_midpoint", rows), &rows, |b, _| {
            b.iter(|| {
                let mut scan = TableScan::new(
                    fixtures::wrapped(table.clone()),
                    0,
                    ScanType::GreaterThanEquals,
                    Value::Int32(500),
                );
                scan.execute().unwrap();
                black_box(scan.output().unwrap());
            });
        });
    }

    group.finish();
}

fn bench_scan_dictionary_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan/dictionary");

    // All chunks but the tail are dictionary-encoded; the per-width inner
    // loops dominate here.
    for unique_values in [100i32, 50_000, 100_000] {
        let table = fixtures::int_table(10, 10_000, unique_values, true);
        group.bench_with_input(
            BenchmarkId::new("ge_midpoint", unique_values),
            &unique_values,
            |b, &unique_values| {
                b.iter(|| {
                    let mut scan = TableScan::new(
                        fixtures::wrapped(table.clone()),
                        0,
                        ScanType::GreaterThanEquals,
                        Value::Int32(unique_values / 2),
                    );
                    scan.execute().unwrap();
                    black_box(scan.output().unwrap());
                });
            },
        );
    }

    group.finish();
}

fn bench_scan_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan/operator");

    let table = fixtures::int_table(10, 10_000, 1_000, true);
    for (name, scan_type) in [
        ("eq", ScanType::Equals),
        ("ne", ScanType::NotEquals),
        ("lt", ScanType::LessThan),
        ("ge", ScanType::GreaterThanEquals),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut scan = TableScan::new(
                    fixtures::wrapped(table.clone()),
                    0,
                    scan_type,
                    Value::Int32(500),
                );
                scan.execute().unwrap();
                black_box(scan.output().unwrap());
            });
        });
    }

    group.finish();
}

fn bench_chained_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan/chained");

    let table = fixtures::int_table(10, 10_000, 1_000, true);
    group.bench_function("range", |b| {
        b.iter(|| {
            let mut first = TableScan::new(
                fixtures::wrapped(table.clone()),
                0,
                ScanType::GreaterThanEquals,
                Value::Int32(250),
            );
            first.execute().unwrap();
            let mut second = TableScan::new(
                Box::new(first),
                0,
                ScanType::LessThan,
                Value::Int32(750),
            );
            second.execute().unwrap();
            black_box(second.output().unwrap());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scan_value_chunks,
    bench_scan_dictionary_chunks,
    bench_scan_operators,
    bench_chained_scan,
);

criterion_main!(benches);
