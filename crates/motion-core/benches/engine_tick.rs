//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench -p motion-core`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use motion_core::{
    connection_pairs, EffectConfig, EffectKind, MotionEngine, MotionMode, Painter, ParticleField,
};

struct NullPainter;

impl Painter for NullPainter {
    fn clear(&mut self, _w: f32, _h: f32) {}
    fn line(&mut self, a: Vec2, b: Vec2, _w: f32, _c: [f32; 3], _alpha: f32) {
        black_box((a, b));
    }
    fn circle(&mut self, c: Vec2, r: f32, _col: [f32; 3], _a: f32) {
        black_box((c, r));
    }
    fn glow(&mut self, c: Vec2, r: f32, _col: [f32; 3], _a: f32) {
        black_box((c, r));
    }
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for kind in EffectKind::ALL {
        group.bench_function(kind.name(), |b| {
            let cfg = EffectConfig::for_kind(kind);
            let Ok(mut engine) = MotionEngine::new(cfg, MotionMode::Full, 0.0) else {
                return;
            };
            engine.resize(Vec2::new(1920.0, 1080.0), 2.0);
            let mut scroll = 0.0;
            let mut t = 0.0;
            b.iter(|| {
                t += 1.0 / 60.0;
                scroll += 12.0;
                engine.pointer_move(Vec2::new(960.0 + scroll % 300.0, 540.0), t);
                engine.scroll_to(scroll);
                engine.tick(1.0);
                engine.render(&mut NullPainter);
            })
        });
    }

    group.finish();
}

fn bench_connections(c: &mut Criterion) {
    let mut group = c.benchmark_group("connection_pairs");
    let cfg = EffectConfig::constellation();

    for count in [40usize, 110, 400] {
        let mut field = ParticleField::new(cfg.spawn, 7);
        field.set_bounds(1920.0, 1080.0);
        field.reconcile(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &field, |b, field| {
            b.iter(|| black_box(connection_pairs(field.particles(), 120.0)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_connections);
criterion_main!(benches);
