//! Database Performance Benchmarks
//!
//! This benchmark suite measures the performance of database build and
//! query operations.
//!
//! ## What We Benchmark
//!
//! ### 1. Build Performance (`bench_database_build`)
//! - Measures records/second for the full encode path
//! - Tests different record counts (1K, 10K, 50K)
//!
//! ### 2. Lookup Performance (`bench_lookup`)
//! - Measures single-postcode resolution latency
//! - Covers both storage modes: a dense bitmap sector and sparse
//!   list sectors
//!
//! ### 3. Enumeration Performance (`bench_enumerate`)
//! - Measures records/second when walking a whole outward
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p pcdb-storage
//!
//! # Run a specific benchmark
//! cargo bench -p pcdb-storage --bench database_bench lookup
//!
//! # Save and compare baselines
//! cargo bench -p pcdb-storage -- --save-baseline main
//! cargo bench -p pcdb-storage -- --baseline main
//! ```

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pcdb_core::PostcodeRecord;
use pcdb_storage::{DatabaseReader, DatabaseWriter};

/// Spread `count` synthetic postcodes over outwards of ~400 units each.
fn synthetic_records(count: u32) -> Vec<PostcodeRecord> {
    (0..count)
        .map(|i| {
            let outward = format!("A{}", i / 4000);
            let sector = (i / 400) % 10;
            let unit = i % 400;
            let c1 = (b'A' + (unit / 26) as u8) as char;
            let c2 = (b'A' + (unit % 26) as u8) as char;
            PostcodeRecord::new(
                format!("{} {}{}{}", outward, sector, c1, c2),
                50.0 + (i % 1000) as f64 * 1e-5,
                -2.0 + (i % 700) as f64 * 1e-5,
            )
        })
        .collect()
}

fn build_reader(records: &[PostcodeRecord]) -> DatabaseReader {
    let mut writer = DatabaseWriter::new();
    for record in records {
        writer.add_record(record);
    }
    DatabaseReader::from_bytes(Bytes::from(writer.finish())).unwrap()
}

fn bench_database_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("database_build");

    for record_count in [1_000u32, 10_000, 50_000] {
        let records = synthetic_records(record_count);

        group.throughput(Throughput::Elements(record_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(record_count),
            &records,
            |b, records| {
                b.iter(|| {
                    let mut writer = DatabaseWriter::new();
                    for record in records {
                        writer.add_record(record);
                    }
                    black_box(writer.finish());
                });
            },
        );
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    let mut records = synthetic_records(50_000);
    // One single-unit outward exercises the list-mode path
    records.push(PostcodeRecord::new("ZZ1 1AA", 59.0, -1.5));
    let reader = build_reader(&records);

    let dense = records[200].postcode.clone();
    let sparse = "ZZ1 1AA".to_string();

    group.bench_function("dense_sector_hit", |b| {
        b.iter(|| black_box(reader.lookup(&dense)));
    });
    group.bench_function("sparse_sector_hit", |b| {
        b.iter(|| black_box(reader.lookup(&sparse)));
    });
    group.bench_function("miss_unknown_outward", |b| {
        b.iter(|| black_box(reader.lookup("ZZ99 9ZZ")));
    });
    group.bench_function("miss_malformed", |b| {
        b.iter(|| black_box(reader.lookup("not a postcode")));
    });

    group.finish();
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");

    let records = synthetic_records(50_000);
    let reader = build_reader(&records);

    // Each outward holds ~4000 units
    group.throughput(Throughput::Elements(4_000));
    group.bench_function("full_outward", |b| {
        b.iter(|| black_box(reader.enumerate_outward("A1")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_database_build,
    bench_lookup,
    bench_enumerate
);
criterion_main!(benches);
