//! Criterion micro-benchmarks for the batch abs and add kernels.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use numprim_bench::{available_kernels, bench_arrays, bench_sizes};

/// Benchmark: in-place abs on each backend. The buffer is refilled from a
/// template each iteration so every run sees negative inputs.
fn bench_abs(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_abs_double");
    for &n in bench_sizes() {
        let (template, _) = bench_arrays(n);
        let mut data = template.clone();
        group.throughput(Throughput::Elements(n as u64));
        for kernels in available_kernels() {
            group.bench_with_input(
                BenchmarkId::new(kernels.backend().name(), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        data.copy_from_slice(&template);
                        kernels.abs_in_place(black_box(&mut data));
                    });
                },
            );
        }
    }
    group.finish();
}

/// Benchmark: out-of-place add on each backend.
fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_add_double");
    for &n in bench_sizes() {
        let (a, b) = bench_arrays(n);
        let mut out = vec![0.0; n];
        group.throughput(Throughput::Elements(n as u64));
        for kernels in available_kernels() {
            group.bench_with_input(
                BenchmarkId::new(kernels.backend().name(), n),
                &n,
                |bench, _| {
                    bench.iter(|| {
                        kernels
                            .add(black_box(&a), black_box(&b), &mut out)
                            .unwrap();
                        black_box(out[0]);
                    });
                },
            );
        }
    }
    group.finish();
}

/// Benchmark: accumulate in place (`out` aliases `a`).
fn bench_add_assign(c: &mut Criterion) {
    let n = 16_384;
    let (mut acc, b) = bench_arrays(n);
    let mut group = c.benchmark_group("batch_add_assign");
    group.throughput(Throughput::Elements(n as u64));
    for kernels in available_kernels() {
        group.bench_function(kernels.backend().name(), |bench| {
            bench.iter(|| {
                kernels.add_assign(&mut acc, black_box(&b)).unwrap();
                black_box(acc[0]);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_abs, bench_add, bench_add_assign);
criterion_main!(benches);
