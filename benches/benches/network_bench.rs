//! # KalmanFilterNetwork Benchmarks
//!
//! Measures the per-sample cost of the prior/posterior cycle. Both updates
//! work on fixed-size state and never allocate.
//!
//! Run: `cargo bench --bench network_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use ridge_filter::{KalmanFilterNetwork, MathPrecision, NetworkConfig};

const FS: f32 = 16_000.0;

/// Benchmark one sample through a resonant network
fn bench_resonant_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("resonant_cycle");

    for precision in [MathPrecision::Exact, MathPrecision::Approximate] {
        let config = NetworkConfig::resonant(&[150.0]).with_precision(precision);
        let mut network = KalmanFilterNetwork::new(&config).unwrap();

        group.bench_function(BenchmarkId::new("single_mode", precision), |b| {
            b.iter(|| {
                network.prior_update(black_box(FS));
                black_box(network.posterior_update(black_box(0.5)))
            })
        });
    }

    group.finish();
}

/// Benchmark harmonic networks of growing size
fn bench_harmonic_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("harmonic_cycle");

    for modes in [1usize, 6, 16] {
        let config = NetworkConfig::harmonic(modes).with_precision(MathPrecision::Exact);
        let mut network = KalmanFilterNetwork::new(&config).unwrap();
        let mut fundamental = 0.0f32;

        group.bench_with_input(BenchmarkId::new("modes", modes), &modes, |b, _| {
            b.iter(|| {
                fundamental = (fundamental + 0.0589).rem_euclid(std::f32::consts::TAU);
                network.prior_update(black_box(fundamental));
                black_box(network.posterior_update(black_box(fundamental.sin())))
            })
        });
    }

    group.finish();
}

/// Benchmark snapshot serialization for monitoring
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    let network = KalmanFilterNetwork::new(&NetworkConfig::default()).unwrap();

    group.bench_function("current_parameters", |b| {
        b.iter(|| black_box(network.current_parameters()))
    });

    group.finish();
}

criterion_group!(benches, bench_resonant_cycle, bench_harmonic_cycle, bench_snapshot);
criterion_main!(benches);
