use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use glam::{Quat, Vec3};

use label_grid::{GridInfo, LabelGrid, OrientedBox3, Point4, RasterConfig, TargetRasterizer};

fn scene() -> (Vec<Point4>, Vec<OrientedBox3>) {
    let mut points = Vec::new();
    let mut boxes = Vec::new();
    for k in 0..40 {
        let angle = k as f32 * 0.157;
        let radius = 5.0 + k as f32 * 1.2;
        let center = Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
        boxes.push(OrientedBox3::new(
            center,
            Vec3::new(1.9, 4.6, 1.7),
            Quat::from_rotation_z(angle),
            "vehicle.car",
        ));
        for i in 0..50 {
            let t = i as f32 * 0.01;
            points.push(Point4::new(center.x + t, center.y - t, t, 0.3));
        }
    }
    // Background returns.
    for i in 0..100_000 {
        let a = i as f32 * 0.0031;
        let r = 2.0 + (i % 700) as f32 * 0.1;
        points.push(Point4::new(r * a.cos(), r * a.sin(), -1.5, 0.1));
    }
    (points, boxes)
}

fn bench_rasterize_frame(c: &mut Criterion) {
    let info = GridInfo::square(672, 70.0).unwrap();
    let rasterizer = TargetRasterizer::new(RasterConfig::new(info));
    let (points, boxes) = scene();

    c.bench_function("rasterize_frame_672_40_boxes", |b| {
        b.iter(|| {
            let grid = rasterizer.rasterize_frame(&points, &boxes);
            black_box(grid);
        });
    });

    c.bench_function("rasterize_into_reused_grid", |b| {
        b.iter_batched(
            || LabelGrid::zeros(info),
            |mut grid| {
                let stats = rasterizer.rasterize_into(&mut grid, &points, &boxes);
                black_box((grid, stats));
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_rasterize_frame);
criterion_main!(benches);
