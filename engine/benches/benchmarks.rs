//! Performance benchmarks for gridmuse-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridmuse_engine::{Catalog, PhotoRecord, Reconciler, StoreSnapshot};
use std::collections::HashSet;

fn photo(id: i64) -> PhotoRecord {
    PhotoRecord::new(
        id,
        format!("IMG_{}.jpg", id),
        "Pictures/AdobeLightroom/",
        format!("file:///Pictures/AdobeLightroom/IMG_{}.jpg", id),
    )
}

fn dense(n: i64) -> Catalog {
    Catalog::from_records((1..=n).map(|id| photo(id).with_sort(id))).unwrap()
}

fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering");

    for size in [100i64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("swap", size), &size, |b, &size| {
            let mut catalog = dense(size);
            b.iter(|| catalog.swap(black_box(1), black_box(size)))
        });

        group.bench_with_input(BenchmarkId::new("insert_at_sort", size), &size, |b, &size| {
            let mut catalog = dense(size);
            b.iter(|| catalog.insert_at_sort(black_box(size), black_box(1)))
        });

        group.bench_with_input(BenchmarkId::new("compact", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut catalog = dense(size);
                    catalog.reconcile(&(1..=size).filter(|id| id % 2 == 0).collect::<HashSet<_>>());
                    catalog
                },
                |mut catalog| catalog.compact(),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for size in [100i64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("refresh_pass", size), &size, |b, &size| {
            // A tenth of the photos replaced between runs
            let discovered: Vec<_> = (size / 10..size + size / 10).map(photo).collect();
            b.iter_batched(
                || (dense(size), discovered.clone()),
                |(mut catalog, discovered)| Reconciler::new(&mut catalog).reconcile(discovered).unwrap(),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    let snapshot = StoreSnapshot::from_records(dense(5_000).into_records());
    let json = snapshot.to_json().unwrap();

    group.bench_function("to_json", |b| b.iter(|| black_box(&snapshot).to_json()));
    group.bench_function("from_json", |b| {
        b.iter(|| StoreSnapshot::from_json(black_box(&json)))
    });

    group.finish();
}

criterion_group!(benches, bench_ordering, bench_reconcile, bench_snapshot);
criterion_main!(benches);
