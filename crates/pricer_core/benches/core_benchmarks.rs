//! Criterion benchmarks for the pricer_core numerics kernel.
//!
//! Measures the normal CDF (called several times per closed-form price) and
//! Brent root finding on a smooth and a kinked function.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::math::solvers::{BrentSolver, SolverConfig};

/// Benchmark a sweep of normal CDF/PDF evaluations.
fn bench_distributions(c: &mut Criterion) {
    let xs: Vec<f64> = (0..1000).map(|i| -5.0 + i as f64 * 0.01).collect();

    c.bench_function("norm_cdf_1000", |b| {
        b.iter(|| xs.iter().map(|&x| norm_cdf(black_box(x))).sum::<f64>())
    });
    c.bench_function("norm_pdf_1000", |b| {
        b.iter(|| xs.iter().map(|&x| norm_pdf(black_box(x))).sum::<f64>())
    });
}

/// Benchmark Brent root finding at several tolerances.
fn bench_brent(c: &mut Criterion) {
    let mut group = c.benchmark_group("brent");

    for tol in [1e-6, 1e-10, 1e-14] {
        let solver = BrentSolver::new(SolverConfig::new(tol, 200));
        group.bench_with_input(BenchmarkId::new("cubic", tol), &solver, |b, solver| {
            b.iter(|| solver.find_root(|x: f64| x * x * x - x - 2.0, black_box(1.0), 2.0))
        });
        group.bench_with_input(BenchmarkId::new("kinked", tol), &solver, |b, solver| {
            b.iter(|| {
                solver.find_root(
                    |x: f64| (x - 0.3).max(0.0) * 10.0 + (x - 0.3).min(0.0) * 0.1,
                    black_box(-1.0),
                    1.0,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_distributions, bench_brent);
criterion_main!(benches);
