//! Performance benchmarks for the dispatch planners.
//!
//! Measures nearest-floor lookup and SCAN visit ordering over request sets
//! of increasing size, plus a full destination batch on instant timing.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench dispatch_bench
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use elevator_car::{Elevator, nearest_floor, visit_order};
use elevator_core::{Floor, Timing};
use std::hint::black_box;

/// Every third floor from 0 up to `count * 3`.
fn sparse_floors(count: usize) -> Vec<Floor> {
    (0..count as Floor).map(|i| i * 3).collect()
}

/// Benchmark nearest-floor lookup against sorted candidate sets.
fn bench_nearest_floor(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_floor");
    group.throughput(Throughput::Elements(1));

    for count in [4, 64, 1024] {
        let floors = sparse_floors(count);
        let middle = floors[count / 2] + 1;

        group.bench_with_input(BenchmarkId::new("middle", count), &floors, |b, floors| {
            b.iter(|| {
                let result = nearest_floor(black_box(middle), black_box(floors));
                black_box(result)
            });
        });

        // Current floor above every candidate takes the clamped path
        group.bench_with_input(BenchmarkId::new("above_all", count), &floors, |b, floors| {
            b.iter(|| {
                let result = nearest_floor(black_box(Floor::MAX), black_box(floors));
                black_box(result)
            });
        });
    }

    group.finish();
}

/// Benchmark SCAN ordering with the car in the middle of the request set.
fn bench_visit_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit_order");

    for count in [4, 64, 1024] {
        // Unsorted and duplicated, the way buttons are actually pressed
        let mut floors = sparse_floors(count);
        floors.reverse();
        let repeats = floors[..count / 4].to_vec();
        floors.extend(repeats);
        let current = (count as Floor * 3) / 2;

        group.throughput(Throughput::Elements(floors.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &floors, |b, floors| {
            b.iter(|| {
                let order = visit_order(black_box(current), floors[0], black_box(floors));
                black_box(order)
            });
        });
    }

    group.finish();
}

/// Benchmark a whole destination batch with no simulated delays.
fn bench_destination_batch(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    let mut group = c.benchmark_group("destination_batch");
    let floors = vec![12, 3, 18, 7, 1, 25, 9];
    group.throughput(Throughput::Elements(floors.len() as u64));

    group.bench_function("seven_stops", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let mut elevator = Elevator::starting_at(Timing::instant(), 10);
                elevator
                    .pressed_floor_buttons(black_box(floors.clone()))
                    .await
                    .unwrap();
                black_box(elevator.state().current_floor())
            })
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_nearest_floor,
    bench_visit_order,
    bench_destination_batch,
);

criterion_main!(benches);
