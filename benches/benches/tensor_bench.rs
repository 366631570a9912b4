//! # Tensor Benchmarks
//!
//! Measures elementwise arithmetic, matrix multiplication and
//! reductions across element types and sizes.
//!
//! Run: `cargo bench --bench tensor_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tensa_core::Tensor;

/// Benchmark elementwise operations with varying sizes
fn bench_elementwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("elementwise");
    let mut rng = StdRng::seed_from_u64(42);

    for size in [256u64, 1024, 4096, 16384].iter() {
        let n = *size as usize;
        let a = Tensor::<f32>::random(&[n], -1.0, 1.0, &mut rng).unwrap();
        let b = Tensor::<f32>::random(&[n], -1.0, 1.0, &mut rng).unwrap();

        group.throughput(Throughput::Elements(*size));

        group.bench_with_input(BenchmarkId::new("add_f32", size), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.add(b).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("mul_f32", size), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.mul(b).unwrap()))
        });

        let a64 = Tensor::<f64>::random(&[n], -1.0, 1.0, &mut rng).unwrap();
        let b64 = Tensor::<f64>::random(&[n], -1.0, 1.0, &mut rng).unwrap();

        group.bench_with_input(
            BenchmarkId::new("add_f64", size),
            &(&a64, &b64),
            |bench, (a, b)| bench.iter(|| black_box(a.add(b).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark matrix multiplication
fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    let mut rng = StdRng::seed_from_u64(42);

    for dim in [16u64, 64, 128, 256].iter() {
        let n = *dim as usize;
        let a = Tensor::<f32>::random(&[n, n], -1.0, 1.0, &mut rng).unwrap();
        let b = Tensor::<f32>::random(&[n, n], -1.0, 1.0, &mut rng).unwrap();

        group.throughput(Throughput::Elements(dim * dim * dim));

        group.bench_with_input(
            BenchmarkId::new("square_f32", dim),
            &(&a, &b),
            |bench, (a, b)| bench.iter(|| black_box(a.matmul(b).unwrap())),
        );

        let a64 = Tensor::<f64>::random(&[n, n], -1.0, 1.0, &mut rng).unwrap();
        let b64 = Tensor::<f64>::random(&[n, n], -1.0, 1.0, &mut rng).unwrap();

        group.bench_with_input(
            BenchmarkId::new("square_f64", dim),
            &(&a64, &b64),
            |bench, (a, b)| bench.iter(|| black_box(a.matmul(b).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark reductions and statistics
fn bench_reductions(c: &mut Criterion) {
    let mut group = c.benchmark_group("reductions");
    let mut rng = StdRng::seed_from_u64(42);

    for size in [1024u64, 16384, 65536].iter() {
        let n = *size as usize;
        let t = Tensor::<f32>::random(&[n], -1.0, 1.0, &mut rng).unwrap();

        group.throughput(Throughput::Elements(*size));

        group.bench_with_input(BenchmarkId::new("sum", size), &t, |bench, t| {
            bench.iter(|| black_box(t.sum()))
        });

        group.bench_with_input(BenchmarkId::new("dot", size), &t, |bench, t| {
            bench.iter(|| black_box(t.dot(t).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("argmax", size), &t, |bench, t| {
            bench.iter(|| black_box(t.argmax()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_elementwise, bench_matmul, bench_reductions);
criterion_main!(benches);
