//! # ML Benchmarks
//!
//! Measures activation passes, loss evaluation and optimizer steps.
//!
//! Run: `cargo bench --bench ml_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tensa_core::Tensor;
use tensa_ml::activations::{Activation, Gelu, Relu, Sigmoid, Softmax};
use tensa_ml::loss::{CrossEntropy, Loss, Mse};
use tensa_ml::optim::{Adam, Optimizer, Sgd};

/// Benchmark activation forward passes
fn bench_activations(c: &mut Criterion) {
    let mut group = c.benchmark_group("activations");
    let mut rng = StdRng::seed_from_u64(42);

    let x = Tensor::<f32>::random(&[64, 256], -3.0, 3.0, &mut rng).unwrap();
    group.throughput(Throughput::Elements(x.count() as u64));

    group.bench_function("relu_forward", |b| {
        b.iter(|| black_box(Relu.forward(&x)))
    });

    group.bench_function("sigmoid_forward", |b| {
        b.iter(|| black_box(Sigmoid.forward(&x)))
    });

    group.bench_function("gelu_forward", |b| {
        b.iter(|| black_box(Gelu.forward(&x)))
    });

    group.bench_function("softmax_forward", |b| {
        b.iter(|| black_box(Softmax.forward(&x)))
    });

    let upstream = Tensor::<f32>::random(&[64, 256], -1.0, 1.0, &mut rng).unwrap();
    group.bench_function("softmax_backward", |b| {
        b.iter(|| black_box(Softmax.backward(&x, &upstream).unwrap()))
    });

    group.finish();
}

/// Benchmark loss evaluation with batched inputs
fn bench_losses(c: &mut Criterion) {
    let mut group = c.benchmark_group("losses");
    let mut rng = StdRng::seed_from_u64(42);

    let pred = Tensor::<f32>::random(&[64, 10], -2.0, 2.0, &mut rng).unwrap();
    let mut targets = Tensor::<f32>::zeros(&[64, 10]).unwrap();
    for row in 0..64 {
        targets.set(&[row, row % 10], 1.0).unwrap();
    }

    group.throughput(Throughput::Elements(pred.count() as u64));

    group.bench_function("mse_forward", |b| {
        b.iter(|| black_box(Mse.forward(&pred, &targets).unwrap()))
    });

    group.bench_function("cross_entropy_forward", |b| {
        b.iter(|| black_box(CrossEntropy.forward(&pred, &targets).unwrap()))
    });

    group.bench_function("cross_entropy_backward", |b| {
        b.iter(|| black_box(CrossEntropy.backward(&pred, &targets).unwrap()))
    });

    group.finish();
}

/// Benchmark optimizer steps with varying parameter counts
fn bench_optimizers(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimizers");
    let mut rng = StdRng::seed_from_u64(42);

    for size in [1024u64, 16384, 65536].iter() {
        let n = *size as usize;
        let params = vec![Tensor::<f32>::random(&[n], -1.0, 1.0, &mut rng).unwrap()];
        let grads = vec![Tensor::<f32>::random(&[n], -0.1, 0.1, &mut rng).unwrap()];

        group.throughput(Throughput::Elements(*size));

        group.bench_with_input(BenchmarkId::new("sgd", size), &(), |bench, _| {
            let mut opt = Sgd::new(0.01).with_momentum(0.9);
            let mut p = params.clone();
            bench.iter(|| {
                opt.step(&mut p, &grads).unwrap();
                black_box(&p);
            })
        });

        group.bench_with_input(BenchmarkId::new("adam", size), &(), |bench, _| {
            let mut opt = Adam::new(0.001);
            let mut p = params.clone();
            bench.iter(|| {
                opt.step(&mut p, &grads).unwrap();
                black_box(&p);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_activations, bench_losses, bench_optimizers);
criterion_main!(benches);
