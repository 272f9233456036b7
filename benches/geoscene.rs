use criterion::{Criterion, criterion_group, criterion_main};
use geoscene::gps::{GeoTag, ImageRecord};
use geoscene::projection::geodetic_to_mercator;
use geoscene::scene::structs::ProjectionOrigin;
use geoscene::scene::{build_frame, resolve_tiles};
use std::hint::black_box;
use std::sync::Arc;

fn records(count: usize) -> Vec<ImageRecord> {
    (0..count)
        .map(|i| {
            let step = i as f64 / count as f64;
            let tag = GeoTag {
                source_name: format!("IMG_{i:05}.jpg"),
                latitude: 48.85 + step * 0.01,
                longitude: 2.29 + (step * 7.0).sin() * 0.01,
                altitude_meters: 30.0 + step * 20.0,
                heading_degrees: None,
                heading_ref: None,
            };
            ImageRecord::new(tag, Arc::from(Vec::new()))
        })
        .collect()
}

fn bench(c: &mut Criterion) {
    c.bench_function("projection::geodetic_to_mercator", |b| {
        b.iter(|| geodetic_to_mercator(black_box(48.8584), black_box(2.2945)).unwrap());
    });

    let batch = records(1_000);
    c.bench_function("scene::build_frame(1000)", |b| {
        b.iter(|| build_frame(black_box(&batch)).unwrap());
    });

    let origin = ProjectionOrigin::new(48.8584, 2.2945).unwrap();
    c.bench_function("scene::resolve_tiles(radius 5)", |b| {
        b.iter(|| resolve_tiles(black_box(&origin), 19, 5).unwrap());
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
