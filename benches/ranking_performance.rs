//! Performance benchmarks for queue ranking

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use olga_queue::queue::{position_of, rank};
use olga_queue::types::QueueItem;
use olga_queue::wait_time::WaitEstimator;

fn create_queue(size: usize) -> Vec<QueueItem> {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    (0..size)
        .map(|i| {
            // Spread priorities 1..=9 and interleave enqueue times
            let priority = (i * 7 % 9) as i32 + 1;
            let created_at = start + Duration::seconds(((i * 31) % size) as i64);
            QueueItem::new(priority, created_at.to_rfc3339()).with_id(i as i64)
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    for size in [10, 100, 1_000, 10_000] {
        let items = create_queue(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| rank(black_box(items)))
        });
    }
    group.finish();
}

fn bench_position_of(c: &mut Criterion) {
    let items = create_queue(1_000);
    let target = items[500].clone();

    c.bench_function("position_of_1000", |b| {
        b.iter(|| position_of(black_box(&items), black_box(&target)))
    });
}

fn bench_estimate(c: &mut Criterion) {
    let estimator = WaitEstimator::default();

    c.bench_function("estimate_wait", |b| {
        b.iter(|| estimator.estimate(black_box(1_234)))
    });
}

criterion_group!(benches, bench_rank, bench_position_of, bench_estimate);
criterion_main!(benches);
