// Host-side integration tests for a full engine instance.

use glam::Vec2;
use motion_core::{
    Capabilities, EffectConfig, EffectKind, LifecycleGate, MotionEngine, MotionMode, Painter,
    SurfaceChange, TeardownStep,
};

#[derive(Default)]
struct Counter {
    clears: usize,
    lines: usize,
    circles: usize,
}

impl Painter for Counter {
    fn clear(&mut self, _w: f32, _h: f32) {
        self.clears += 1;
    }
    fn line(&mut self, _a: Vec2, _b: Vec2, _w: f32, _c: [f32; 3], _a2: f32) {
        self.lines += 1;
    }
    fn circle(&mut self, _c: Vec2, _r: f32, _col: [f32; 3], _a: f32) {
        self.circles += 1;
    }
    fn glow(&mut self, _c: Vec2, _r: f32, _col: [f32; 3], _a: f32) {}
}

fn full_caps() -> Capabilities {
    Capabilities {
        fine_pointer: true,
        reduced_motion: false,
        canvas_2d: true,
    }
}

fn engine(kind: EffectKind) -> MotionEngine {
    let cfg = EffectConfig::for_kind(kind);
    let mode = MotionMode::resolve(&full_caps(), &cfg);
    MotionEngine::new(cfg, mode, 0.0).expect("presets are valid")
}

#[test]
fn frames_before_sizing_paint_nothing() {
    let mut e = engine(EffectKind::Constellation);
    let mut c = Counter::default();
    assert_eq!(e.resize(Vec2::ZERO, 1.0), SurfaceChange::Deferred);
    assert!(e.frame(0.0, &mut c).is_none());
    assert_eq!(c.clears, 0);
    assert!(e.field().is_empty());
}

fn fixed_count(count: usize) -> EffectConfig {
    let mut cfg = EffectConfig::constellation();
    cfg.regular.area_per_particle = 1_000_000.0;
    cfg.regular.min_count = count;
    cfg.regular.max_count = count;
    cfg
}

#[test]
fn shrinking_particle_budget_truncates_in_order() {
    let big = fixed_count(25);
    let mode = MotionMode::resolve(&full_caps(), &big);
    let mut e = MotionEngine::new(big, mode, 0.0).unwrap();
    e.resize(Vec2::new(1000.0, 800.0), 1.0);
    assert_eq!(e.field().len(), 25);
    let before = e.field().particles().to_vec();

    // Same seed with a smaller budget yields the same leading particles.
    let mut small = MotionEngine::new(fixed_count(15), mode, 0.0).unwrap();
    small.resize(Vec2::new(1000.0, 800.0), 1.0);
    assert_eq!(small.field().particles(), &before[..15]);

    e.field_mut().reconcile(15);
    assert_eq!(e.field().particles(), &before[..15]);
    e.tick(1.0);
    assert_eq!(e.field().len(), 15);
    assert!(e.field().particles().iter().all(|p| p.is_finite()));
}

#[test]
fn scroll_burst_produces_streaks_then_settles() {
    let mut e = engine(EffectKind::ScrollStreaks);
    e.resize(Vec2::new(1200.0, 800.0), 1.0);
    let n = e.field().len();

    let mut offset = 0.0;
    for _ in 0..30 {
        offset += 60.0;
        e.scroll_to(offset);
        e.tick(1.0);
    }
    assert!(e.scroll_velocity() > 30.0);
    let mut c = Counter::default();
    e.render(&mut c);
    assert_eq!(c.lines, n, "one streak per particle");

    for _ in 0..200 {
        e.tick(1.0);
    }
    assert_eq!(e.scroll_velocity(), 0.0);
    let mut c = Counter::default();
    e.render(&mut c);
    assert_eq!(c.lines, 0);
}

#[test]
fn pointer_drives_trail_and_fades_when_idle() {
    let mut e = engine(EffectKind::CursorTrail);
    e.resize(Vec2::new(1200.0, 800.0), 1.0);

    let mut t = 0.0;
    for i in 0..20 {
        t += 1.0 / 60.0;
        e.pointer_move(Vec2::new(100.0 + i as f32 * 10.0, 200.0), t);
        let mut c = Counter::default();
        e.frame(t, &mut c);
    }
    assert!(e.trail().unwrap().head().is_some());
    assert!(e.activity() > 0.5);
    assert!(e.pointer_velocity().x > 0.0);

    // No movement for longer than the idle timeout.
    for _ in 0..400 {
        t += 1.0 / 60.0;
        let mut c = Counter::default();
        e.frame(t, &mut c);
    }
    assert!(!e.signals().is_active());
    assert_eq!(e.activity(), 0.0);
}

#[test]
fn trail_snaps_to_pointer_on_reentry() {
    let mut e = engine(EffectKind::CursorTrail);
    e.resize(Vec2::new(1200.0, 800.0), 1.0);

    let mut t = 0.0;
    for _ in 0..5 {
        t += 1.0 / 60.0;
        e.pointer_move(Vec2::new(100.0, 100.0), t);
        e.frame(t, &mut Counter::default());
    }
    e.pointer_leave();
    for _ in 0..400 {
        t += 1.0 / 60.0;
        e.frame(t, &mut Counter::default());
    }
    assert_eq!(e.activity(), 0.0);

    t += 1.0 / 60.0;
    let entry = Vec2::new(1000.0, 700.0);
    e.pointer_move(entry, t);
    e.frame(t, &mut Counter::default());

    let trail = e.trail().unwrap();
    assert_eq!(trail.head(), Some(entry));
    assert!(trail.buffer().iter_oldest_first().all(|(_, p)| p == entry));
}

#[test]
fn trail_snaps_after_idle_timeout() {
    let mut e = engine(EffectKind::CursorTrail);
    e.resize(Vec2::new(1200.0, 800.0), 1.0);

    let mut t = 0.0;
    e.pointer_move(Vec2::new(50.0, 50.0), t);
    e.frame(t, &mut Counter::default());
    // Still hovering, but no movement for longer than the timeout.
    for _ in 0..120 {
        t += 1.0 / 60.0;
        e.frame(t, &mut Counter::default());
    }
    assert!(!e.signals().is_active());

    t += 1.0 / 60.0;
    e.pointer_move(Vec2::new(600.0, 400.0), t);
    e.frame(t, &mut Counter::default());
    assert_eq!(e.trail().unwrap().head(), Some(Vec2::new(600.0, 400.0)));
}

#[test]
fn calm_mode_keeps_particles_in_place() {
    let cfg = EffectConfig::scroll_streaks();
    let caps = Capabilities {
        reduced_motion: true,
        ..full_caps()
    };
    let mode = MotionMode::resolve(&caps, &cfg);
    assert_eq!(mode, MotionMode::Calm);
    let mut e = MotionEngine::new(cfg, mode, 0.0).unwrap();
    e.resize(Vec2::new(1200.0, 800.0), 1.0);
    let before: Vec<Vec2> = e.field().particles().iter().map(|p| p.position).collect();
    e.scroll_to(5_000.0);
    for _ in 0..10 {
        e.tick(1.0);
    }
    let after: Vec<Vec2> = e.field().particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
    let mut c = Counter::default();
    e.render(&mut c);
    assert_eq!(c.lines, 0, "no streaks without dynamics");
}

#[test]
fn huge_dt_is_clamped_inside_tick() {
    let mut e = engine(EffectKind::Constellation);
    e.resize(Vec2::new(1200.0, 800.0), 1.0);
    e.tick(1_000_000.0);
    e.tick(f32::NAN);
    assert!(e.field().particles().iter().all(|p| p.is_finite()));
}

#[test]
fn non_finite_particles_are_reseeded() {
    let mut e = engine(EffectKind::Constellation);
    e.resize(Vec2::new(1200.0, 800.0), 1.0);
    e.field_mut().particles_mut()[0].velocity = Vec2::new(f32::NAN, 0.0);
    e.tick(1.0);
    assert!(e.field().particles()[0].is_finite());
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = EffectConfig::constellation();
    cfg.spawn.palette = &[];
    assert!(MotionEngine::new(cfg, MotionMode::Full, 0.0).is_err());
}

#[test]
fn capability_gating() {
    let trail = EffectConfig::cursor_trail();
    let constellation = EffectConfig::constellation();
    let coarse = Capabilities {
        fine_pointer: false,
        ..full_caps()
    };
    let no_canvas = Capabilities {
        canvas_2d: false,
        ..full_caps()
    };
    let reduced = Capabilities {
        reduced_motion: true,
        ..full_caps()
    };
    assert_eq!(MotionMode::resolve(&coarse, &trail), MotionMode::Disabled);
    assert_eq!(MotionMode::resolve(&coarse, &constellation), MotionMode::Full);
    assert_eq!(MotionMode::resolve(&no_canvas, &constellation), MotionMode::Disabled);
    assert_eq!(MotionMode::resolve(&reduced, &constellation), MotionMode::Static);
    assert!(!MotionMode::Static.ticks());
    assert!(MotionMode::Static.listens_to_resize());
    assert!(!MotionMode::Disabled.listens_to_resize());
    assert!(!MotionMode::Calm.listens_to_input());
}

#[test]
fn unmount_removes_listeners_before_cancelling_frame() {
    let cfg = EffectConfig::constellation();
    let mut gate = LifecycleGate::new(&full_caps(), &cfg);
    assert_eq!(gate.unmount(), &[] as &[TeardownStep]);
    assert!(gate.mount());
    assert!(!gate.mount());
    assert_eq!(
        gate.unmount(),
        &[TeardownStep::RemoveListeners, TeardownStep::CancelFrame]
    );
    assert!(gate.unmount().is_empty());
}

#[test]
fn disabled_gate_never_mounts() {
    let cfg = EffectConfig::cursor_trail();
    let caps = Capabilities {
        fine_pointer: false,
        ..full_caps()
    };
    let mut gate = LifecycleGate::new(&caps, &cfg);
    assert_eq!(gate.mode(), MotionMode::Disabled);
    assert!(!gate.mount());
}
