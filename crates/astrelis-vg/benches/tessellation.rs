//! Benchmarks for tessellation and frame submission.

use std::sync::Arc;

use astrelis_test_utils::MonospaceGlyphs;
use astrelis_vg::{
    Backend, BackendError, Color, ColorGradient, Config, DrawBuffer, Drawer, FontHandle,
    FrameInfo, GradientDrawBuffer, GradientKind, JointMode, OutlineOptions, StyleOptions,
    TextDrawBuffer, TextOptions, TexturedDrawBuffer, VectorRenderer,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec2;

/// Backend that accepts everything and draws nothing.
struct NullBackend;

impl Backend for NullBackend {
    fn initialize(&mut self) -> Result<(), BackendError> {
        Ok(())
    }
    fn terminate(&mut self) {}
    fn start_frame(&mut self, _info: &FrameInfo) {}
    fn draw_plain(&mut self, buffer: &DrawBuffer) {
        black_box(buffer.vertex_count());
    }
    fn draw_gradient(&mut self, buffer: &GradientDrawBuffer) {
        black_box(buffer.buffer.vertex_count());
    }
    fn draw_textured(&mut self, buffer: &TexturedDrawBuffer) {
        black_box(buffer.buffer.vertex_count());
    }
    fn draw_text(&mut self, buffer: &TextDrawBuffer) {
        black_box(buffer.buffer.vertex_count());
    }
    fn end_frame(&mut self) {}
}

fn zigzag(count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|i| Vec2::new(i as f32 * 8.0, if i % 2 == 0 { 0.0 } else { 12.0 }))
        .collect()
}

fn bench_polyline(c: &mut Criterion) {
    let mut group = c.benchmark_group("polyline");
    let style = StyleOptions::stroke(Color::WHITE, 3.0);

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        let points = zigzag(size);

        for mode in [JointMode::None, JointMode::Bevel, JointMode::Miter] {
            let mut drawer = Drawer::new(Arc::new(Config::default().with_joint_mode(mode)));
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), size),
                &points,
                |b, points| {
                    b.iter(|| {
                        drawer.draw_lines(black_box(points), &style, 0);
                        drawer.end_frame();
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_curves(c: &mut Criterion) {
    let mut group = c.benchmark_group("curves");
    let style = StyleOptions::stroke(Color::WHITE, 2.0);
    let mut drawer = Drawer::new(Arc::new(Config::default()));

    for segments in [16, 64, 256] {
        group.throughput(Throughput::Elements(segments as u64));

        group.bench_with_input(BenchmarkId::new("arc", segments), &segments, |b, &segments| {
            b.iter(|| {
                drawer.draw_arc(
                    black_box(Vec2::ZERO),
                    black_box(Vec2::new(100.0, 0.0)),
                    0.0,
                    false,
                    &style,
                    Some(segments),
                    0,
                );
                drawer.end_frame();
            });
        });

        group.bench_with_input(BenchmarkId::new("bezier", segments), &segments, |b, &segments| {
            b.iter(|| {
                drawer.draw_bezier(
                    black_box(Vec2::ZERO),
                    Vec2::new(30.0, 80.0),
                    Vec2::new(70.0, -80.0),
                    black_box(Vec2::new(100.0, 0.0)),
                    &style,
                    segments,
                    0,
                );
                drawer.end_frame();
            });
        });
    }

    group.finish();
}

fn bench_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("shapes");
    let count = 100;
    group.throughput(Throughput::Elements(count));

    let plain = StyleOptions::fill(Color::RED);
    let rounded = StyleOptions::fill(Color::RED).with_rounding(0.5);
    let styled = StyleOptions::gradient(ColorGradient::new(
        Color::RED,
        Color::BLUE,
        GradientKind::Radial,
    ))
    .with_rounding(0.25)
    .with_outline(OutlineOptions::new(2.0, Color::BLACK))
    .with_aa(true);

    let config = Arc::new(Config::default().with_aa(1.0));
    for (name, style) in [("plain", plain), ("rounded", rounded), ("styled", styled)] {
        let mut drawer = Drawer::new(config.clone());
        group.bench_function(BenchmarkId::new("rect", name), |b| {
            b.iter(|| {
                for i in 0..count {
                    let min = Vec2::splat(i as f32 * 4.0);
                    drawer.draw_rect(black_box(min), min + Vec2::splat(30.0), &style, 15.0, 0);
                }
                drawer.end_frame();
            });
        });
    }

    let circle = StyleOptions::fill(Color::GREEN).with_aa(true);
    let mut drawer = Drawer::new(config);
    group.bench_function("circle", |b| {
        b.iter(|| {
            for i in 0..count {
                drawer.draw_circle(black_box(Vec2::splat(i as f32)), 20.0, &circle, 0);
            }
            drawer.end_frame();
        });
    });

    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");
    let glyphs = MonospaceGlyphs::new();
    let mut drawer = Drawer::new(Arc::new(Config::default()));

    for length in [16, 256, 4096] {
        let text: String = "The quick brown fox jumps over the lazy dog\n"
            .chars()
            .cycle()
            .take(length)
            .collect();
        group.throughput(Throughput::Bytes(length as u64));

        group.bench_with_input(BenchmarkId::new("draw", length), &text, |b, text| {
            b.iter(|| {
                drawer.draw_text(
                    &glyphs,
                    FontHandle(0),
                    black_box(text),
                    Vec2::ZERO,
                    &TextOptions::DEFAULT,
                    0,
                );
                drawer.end_frame();
            });
        });
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    let style = StyleOptions::fill(Color::WHITE);

    for workers in [1, 2, 4] {
        let mut renderer = VectorRenderer::new(NullBackend, Config::default());
        if renderer.initialize().is_err() {
            continue;
        }

        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            b.iter(|| {
                renderer.start_frame(workers).ok();
                renderer
                    .draw_parallel(|worker, drawer| {
                        for i in 0..250 {
                            let min = Vec2::new(i as f32, worker as f32 * 50.0);
                            drawer.draw_rect(min, min + Vec2::splat(8.0), &style, 0.0, i % 8);
                        }
                    })
                    .ok();
                let stats = renderer.render().ok();
                renderer.end_frame().ok();
                stats
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_polyline,
    bench_curves,
    bench_shapes,
    bench_text,
    bench_frame
);
criterion_main!(benches);
