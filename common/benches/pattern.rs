use criterion::{criterion_group, criterion_main, Criterion};

use glsketch_common::image::Image;

pub fn patterns(c: &mut Criterion) {
    c.bench_function("checkerboard_256", |b| {
        b.iter(|| Image::checkerboard(256, 8, [230, 230, 230], [25, 25, 25]))
    });

    c.bench_function("radial_glow_256", |b| {
        b.iter(|| Image::radial_glow(256, [255, 180, 60]))
    });
}

criterion_group!(benches, patterns);
criterion_main!(benches);
