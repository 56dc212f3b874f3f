//! Counting benchmarks
//!
//! Compares the silent path against tracing into memory.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use countlib::{run_counter, Counter, MemorySink};

fn bench_silent(c: &mut Criterion) {
    let mut group = c.benchmark_group("silent");

    for n in [10, 1_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| run_counter(black_box(n), false))
        });
    }

    group.finish();
}

fn bench_memory_sink(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_sink");

    for n in [10, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let sink = MemorySink::new();
                Counter::with_sink(black_box(n), true, &sink).run();
                sink.len()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_silent, bench_memory_sink);
criterion_main!(benches);
