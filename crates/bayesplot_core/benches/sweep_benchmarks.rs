//! Criterion benchmarks for the prior sweep
//!
//! Run with: cargo bench -p bayesplot_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use bayesplot_core::{PriorSweep, TestCharacteristics, posterior, sweep};

fn bench_posterior(c: &mut Criterion) {
    c.bench_function("posterior_single", |b| {
        b.iter(|| posterior(black_box(0.7366), black_box(0.05), black_box(0.2445)))
    });
}

fn bench_sweep(c: &mut Criterion) {
    let test = TestCharacteristics::REFERENCE;
    let mut group = c.benchmark_group("sweep");

    for step in [0.01, 0.001, 0.0001] {
        let grid = PriorSweep {
            step,
            ..PriorSweep::default()
        };
        let priors = grid.priors();
        group.bench_with_input(BenchmarkId::from_parameter(priors.len()), &priors, |b, p| {
            b.iter(|| sweep(black_box(&test), black_box(p)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_posterior, bench_sweep);
criterion_main!(benches);
