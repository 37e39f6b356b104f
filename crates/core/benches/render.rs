//! Benchmarks for card rendering.
//!
//! Run with: cargo bench --package membership-card-core

use criterion::{criterion_group, criterion_main, Criterion};
use membership_card_core::{
    CardRenderer, CardRequest, FontAvailability, RecordingCanvas, RenderConfig,
};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

fn renderer() -> CardRenderer {
    CardRenderer::with_fonts(RenderConfig::default(), Arc::new(FontAvailability::Fallback))
        .expect("default config is valid")
}

fn request() -> CardRequest {
    CardRequest::new("Jelena", "Đorđević", "MBR-004711", "2021-06-30", "card.pdf")
}

fn benchmark_render(c: &mut Criterion) {
    let renderer = renderer();
    let request = request();

    let mut group = c.benchmark_group("render");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("draw_card_recording", |b| {
        b.iter(|| {
            let mut canvas = RecordingCanvas::new();
            black_box(renderer.draw_card(&mut canvas, black_box(&request)).unwrap())
        });
    });

    group.bench_function("render_to_bytes", |b| {
        b.iter(|| black_box(renderer.render_to_bytes(black_box(&request)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, benchmark_render);
criterion_main!(benches);
