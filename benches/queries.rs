//! Benchmarks for the order index.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- probes
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use multi_index_book::{OrderIndex, Side};
use multi_index_book::types::Order;

// ============================================================================
// HELPER FUNCTIONS - Deterministic order generation
// ============================================================================

/// Generate a vector of deterministic orders split between buy and sell.
fn generate_order_batch(count: usize, seed: u64) -> Vec<Order> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let price: u64 = rng.gen_range(1_000..=2_000);
        let quantity: u64 = rng.gen_range(1..=100);
        orders.push(Order::new((i + 1) as u64, side, quantity, price, i as u64));
    }

    orders
}

fn populated_index(count: usize) -> OrderIndex {
    let mut index = OrderIndex::with_capacity(count);
    index
        .insert_all(generate_order_batch(count, 42))
        .expect("generated ids are unique");
    index
}

// ============================================================================
// BENCHMARK: Insert Throughput
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("orders", batch_size),
            &batch_size,
            |b, &size| {
                let orders = generate_order_batch(size, 42);

                b.iter_batched(
                    || (OrderIndex::with_capacity(size), orders.clone()),
                    |(mut index, orders)| {
                        black_box(index.insert_all(orders)).ok();
                        index.len()
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Boundary Probes
// ============================================================================

fn bench_probes(c: &mut Criterion) {
    let mut group = c.benchmark_group("probes");

    group.measurement_time(Duration::from_secs(5));

    for size in [10_000, 100_000] {
        let index = populated_index(size);

        group.bench_with_input(BenchmarkId::new("best_price", size), &index, |b, index| {
            b.iter(|| black_box(index.best_price(black_box(Side::Buy))));
        });

        group.bench_with_input(BenchmarkId::new("worst_price", size), &index, |b, index| {
            b.iter(|| black_box(index.worst_price(black_box(Side::Sell))));
        });

        group.bench_with_input(BenchmarkId::new("find_by_id", size), &index, |b, index| {
            b.iter(|| black_box(index.find_by_id(black_box(size as u64 / 2))));
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Range Queries
// ============================================================================

fn bench_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranges");

    group.measurement_time(Duration::from_secs(5));

    let index = populated_index(100_000);

    group.bench_function("orders_at_price_100k", |b| {
        b.iter(|| black_box(index.orders_at_price(Side::Buy, black_box(1_500)).count()));
    });

    group.bench_function("all_orders_100k", |b| {
        b.iter(|| black_box(index.all_orders(black_box(Side::Sell)).count()));
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(benches, bench_insert, bench_probes, bench_ranges);

criterion_main!(benches);
