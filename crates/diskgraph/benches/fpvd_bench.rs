//! Criterion benchmarks for hull and FPVD construction.
//! Focus sizes: hull points n in {3, 5, 10, 20, 40}; FPVD cost grows as O(n⁴).
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p diskgraph

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use diskgraph::prelude::*;
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// `n` points in convex position: jittered angles on a circle of radius 100.
fn convex_points(n: usize, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut angles: Vec<f64> = (0..n)
        .map(|i| (i as f64 + rng.gen_range(0.1..0.9)) * std::f64::consts::TAU / n as f64)
        .collect();
    angles.sort_by(f64::total_cmp);
    angles
        .into_iter()
        .map(|t| Vector2::new(100.0 * t.cos(), 100.0 * t.sin()))
        .collect()
}

/// `n` points uniform in a box; only some end up on the hull.
fn scattered_points(n: usize, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vector2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
        .collect()
}

fn bench_fpvd(c: &mut Criterion) {
    let cfg = GeomCfg::default();
    let mut group = c.benchmark_group("fpvd");
    for &n in &[3usize, 5, 10, 20, 40] {
        group.bench_with_input(BenchmarkId::new("build_fpvd", n), &n, |b, &n| {
            b.iter_batched(
                || convex_hull(&convex_points(n, 41)),
                |hull| {
                    let _fpvd = build_fpvd(&hull.points, &cfg);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("convex_hull", n), &n, |b, &n| {
            b.iter_batched(
                || scattered_points(n, 42),
                |points| {
                    let _hull = convex_hull(&points);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fpvd, bench_hull);
criterion_main!(benches);
