//! # Math Benchmarks
//!
//! Compares the exact (std) provider against the fast approximations for
//! the functions used on the per-sample path.
//!
//! Run: `cargo bench --bench math_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ridge_math::{MathPrecision, MathProvider};

const ANGLES: [f32; 8] = [-3.0, -2.0, -1.0, -0.25, 0.25, 1.0, 2.0, 3.0];

/// Benchmark sin/cos for each provider
fn bench_trigonometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigonometry");

    for precision in [MathPrecision::Exact, MathPrecision::Approximate] {
        let math = precision.provider();

        group.bench_with_input(BenchmarkId::new("sin_cos", precision), &math, |b, math| {
            b.iter(|| {
                for &theta in &ANGLES {
                    black_box(math.sin(black_box(theta)));
                    black_box(math.cos(black_box(theta)));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("atan2", precision), &math, |b, math| {
            b.iter(|| {
                for &theta in &ANGLES {
                    black_box(math.atan2(black_box(theta), black_box(1.5)));
                }
            })
        });
    }

    group.finish();
}

/// Benchmark sqrt/ln and gaussian sampling
fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    for precision in [MathPrecision::Exact, MathPrecision::Approximate] {
        let math = precision.provider();

        group.bench_with_input(BenchmarkId::new("sqrt", precision), &math, |b, math| {
            b.iter(|| black_box(math.sqrt(black_box(1.25))))
        });

        group.bench_with_input(BenchmarkId::new("ln", precision), &math, |b, math| {
            b.iter(|| black_box(math.ln(black_box(0.37))))
        });

        group.bench_with_input(BenchmarkId::new("gaussian_noise", precision), &math, |b, math| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(math.gaussian_noise(&mut rng)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_trigonometry, bench_arithmetic);
criterion_main!(benches);
