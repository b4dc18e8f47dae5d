//! # Coin Pool Performance Benchmark
//!
//! ARCHITECT'S REQUIREMENTS:
//! - 10,000 live coins
//! - Microsecond acquire/release/tick
//! - 0 allocations after startup
//!
//! Run with: `cargo bench --package midas_pool`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use midas_pool::{snapshot, SpawnPool};

/// The required live-coin count for the benchmark.
const COIN_COUNT: usize = 10_000;

/// Production coin lifetime in ticks.
const LIFETIME: u64 = 300;

/// Benchmark: Create a full-size pool (the only allocating operation).
fn bench_pool_creation(c: &mut Criterion) {
    c.bench_function("pool_creation_10K", |b| {
        b.iter(|| black_box(SpawnPool::<u64>::new(COIN_COUNT, LIFETIME)));
    });
}

/// Benchmark: Acquire slots into a fresh pool.
fn bench_acquire(c: &mut Criterion) {
    let mut group = c.benchmark_group("acquire");

    for count in [100, 1_000, COIN_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut pool = SpawnPool::<u64>::new(count, LIFETIME);
                for _ in 0..count {
                    black_box(pool.acquire().is_ok());
                }
                pool.active_count()
            });
        });
    }

    group.finish();
}

/// THE CRITICAL BENCHMARK: Release and reacquire 1K slots of a full pool.
fn bench_release_acquire_cycle(c: &mut Criterion) {
    let mut pool = SpawnPool::<u64>::new(COIN_COUNT, LIFETIME);

    // Pre-fill the whole pool
    let mut handles = Vec::with_capacity(COIN_COUNT);
    for _ in 0..COIN_COUNT {
        handles.push(pool.acquire().unwrap());
    }

    c.bench_function("CRITICAL_release_acquire_cycle_1K", |b| {
        b.iter(|| {
            for handle in handles.iter().take(1_000) {
                pool.release(*handle).ok();
            }
            for handle in handles.iter_mut().take(1_000) {
                *handle = pool.acquire().unwrap();
            }
            black_box(pool.active_count())
        });
    });
}

/// Benchmark: Tick a full pool with nothing expiring.
fn bench_tick_steady(c: &mut Criterion) {
    let mut pool = SpawnPool::<u64>::new(COIN_COUNT, u64::MAX / 2);
    for _ in 0..COIN_COUNT {
        pool.acquire().ok();
    }

    c.bench_function("tick_10K_active_no_expiry", |b| {
        b.iter(|| black_box(pool.tick()));
    });
}

/// Benchmark: Tick while a steady 1K coins expire every frame.
fn bench_expiry_churn(c: &mut Criterion) {
    let mut pool = SpawnPool::<u64>::new(COIN_COUNT, 10);

    c.bench_function("tick_expiry_churn_1K", |b| {
        b.iter(|| {
            for _ in 0..1_000 {
                if pool.acquire().is_err() {
                    break;
                }
            }
            black_box(pool.tick())
        });
    });
}

/// Benchmark: Validate handles against a full pool.
fn bench_handle_validation(c: &mut Criterion) {
    let mut pool = SpawnPool::<u64>::new(COIN_COUNT, LIFETIME);
    let handles: Vec<_> = (0..COIN_COUNT).map(|_| pool.acquire().unwrap()).collect();

    c.bench_function("validate_10K_handles", |b| {
        b.iter(|| {
            let live = handles.iter().filter(|&&h| pool.is_active(h)).count();
            black_box(live)
        });
    });
}

/// Benchmark: Publish a 10K-entry snapshot frame.
fn bench_snapshot_publish(c: &mut Criterion) {
    let mut pool = SpawnPool::<u64>::new(COIN_COUNT, LIFETIME);
    for _ in 0..COIN_COUNT {
        pool.acquire().ok();
    }
    let (mut writer, _reader) = snapshot::channel::<u64>(COIN_COUNT);

    c.bench_function("snapshot_publish_10K", |b| {
        b.iter(|| black_box(writer.publish(&pool)));
    });
}

criterion_group!(
    benches,
    bench_pool_creation,
    bench_acquire,
    bench_release_acquire_cycle,
    bench_tick_steady,
    bench_expiry_churn,
    bench_snapshot_publish,
    bench_handle_validation,
);

criterion_main!(benches);
