//! Benchmarks for convex collision queries.
//!
//! Measures SAT, Minkowski sum and directional penetration on regular
//! polygons of growing vertex count.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_collide_d2::{minkowski, Line, PenetrationSolver, Point, Polygon};

/// Regular `n`-gon of radius `r` centred at `(cx, cy)`, rotated by `phase`.
fn regular(n: usize, r: f64, cx: f64, cy: f64, phase: f64) -> Polygon {
    let points: Vec<Point> = (0..n)
        .map(|k| {
            let a = phase + std::f64::consts::TAU * k as f64 / n as f64;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect();
    Polygon::from_hull(&points).expect("regular polygon")
}

fn bench_overlap_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_test");
    let solver = PenetrationSolver::default();

    for &n in &[8, 64, 512] {
        let p = regular(n, 10.0, 0.0, 0.0, 0.0);
        let q = regular(n, 10.0, 7.0, 3.0, 0.1);
        group.bench_with_input(BenchmarkId::new("regular", n), &(p, q), |b, (p, q)| {
            b.iter(|| solver.overlap_test(black_box(p), black_box(q)))
        });
    }
    group.finish();
}

fn bench_minkowski_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("minkowski_sum");

    for &n in &[8, 64, 512] {
        let p = regular(n, 10.0, 0.0, 0.0, 0.0);
        let q = regular(n, 5.0, 3.0, 1.0, 0.05);
        group.bench_with_input(BenchmarkId::new("regular", n), &(p, q), |b, (p, q)| {
            b.iter(|| minkowski::sum(black_box(p), black_box(q)))
        });
    }
    group.finish();
}

fn bench_penetration(c: &mut Criterion) {
    let mut group = c.benchmark_group("penetration_vector");
    let solver = PenetrationSolver::default();
    let direction = Line::through(Point::new(0.0, 0.0), Point::new(3.0, 1.0)).expect("line");

    for &n in &[8, 64, 512, 4096] {
        let p = regular(n, 10.0, 0.0, 0.0, 0.0);
        let q = regular(n, 10.0, 7.0, 3.0, 0.1);
        group.bench_with_input(BenchmarkId::new("regular", n), &(p, q), |b, (p, q)| {
            b.iter(|| solver.penetration_vector(black_box(p), black_box(q), &direction, true))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_overlap_test,
    bench_minkowski_sum,
    bench_penetration
);
criterion_main!(benches);
