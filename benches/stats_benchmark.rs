#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for quartile summaries and box plot emission.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_plotter::prelude::*;

fn samples(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let x = (i * 7919 % size) as f64 / size as f64;
            // Heavy upper tail so some samples land beyond the whiskers
            x * 100.0 + if i % 97 == 0 { 1_000.0 } else { 0.0 }
        })
        .collect()
}

fn quartile_summary_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("quartile_summary");

    for size in [100, 1_000, 10_000, 100_000] {
        let data = samples(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| QuartileSummary::from_values(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

fn boxplot_draw_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("boxplot_draw");

    for size in [1_000, 100_000] {
        let bp = BoxPlot::new(20.0, 0.0, &samples(size)).unwrap();
        let mapper = AffineMapper::fit(bp.data_range(), Rect::new(0.0, 0.0, 800.0, 600.0));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut canvas = Recorder::default();
                bp.draw(&mut canvas, &mapper);
                canvas
            });
        });
    }

    group.finish();
}

criterion_group!(benches, quartile_summary_benchmark, boxplot_draw_benchmark);
criterion_main!(benches);
