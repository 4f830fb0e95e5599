use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sextant_geom::{point, rect};
use sextant_route::{PathRequest, PathRouter, Rect};
use std::hint::black_box;
use std::time::Duration;

fn obstacle_field(cols: usize, rows: usize) -> Vec<Rect> {
    let mut out = Vec::with_capacity(cols * rows);
    for r in 0..rows {
        for c in 0..cols {
            let x = 60.0 + c as f64 * 90.0;
            let y = -120.0 + r as f64 * 80.0 + if c % 2 == 0 { 0.0 } else { 30.0 };
            out.push(rect(x, y, 40.0, 40.0));
        }
    }
    out
}

fn bench_find_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_uncached");
    group.measurement_time(Duration::from_secs(5));
    let router = PathRouter::default();

    for &(cols, rows) in &[(2usize, 2usize), (4, 3), (8, 4)] {
        let obstacles = obstacle_field(cols, rows);
        let end = point(100.0 + cols as f64 * 90.0, 0.0);
        group.bench_with_input(
            BenchmarkId::new("field", format!("{cols}x{rows}")),
            &obstacles,
            |b, obstacles| {
                b.iter(|| black_box(router.route_uncached(point(0.0, 0.0), end, black_box(obstacles))))
            },
        );
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let obstacles = obstacle_field(4, 3);
    let requests: Vec<PathRequest> = (0..32)
        .map(|i| PathRequest::new(point(0.0, i as f64 * 7.0), point(460.0, -(i as f64) * 5.0), obstacles.clone()))
        .collect();

    c.bench_function("find_paths_cold_32", |b| {
        b.iter(|| {
            let router = PathRouter::default();
            black_box(router.find_paths(black_box(&requests)))
        })
    });
}

criterion_group!(benches, bench_find_path, bench_batch);
criterion_main!(benches);
