// Host-side tests for the trail ring buffer and cursor trail.

use glam::Vec2;
use motion_core::{age_fraction, CursorTrail, EffectConfig, TrailBuffer, TrailStyle};

fn p(i: usize) -> Vec2 {
    Vec2::new(i as f32, (i * 2) as f32)
}

#[test]
fn ring_keeps_most_recent_capacity_samples() {
    let mut buf = TrailBuffer::new(25, Vec2::ZERO);
    for i in 0..30 {
        buf.push(p(i));
    }
    assert_eq!(buf.age_of(0), Some(p(29)));
    assert_eq!(buf.age_of(24), Some(p(5)));
    assert_eq!(buf.age_of(25), None);
    for age in 0..25 {
        assert_eq!(buf.age_of(age), Some(p(29 - age)));
    }
    assert_eq!(buf.pushed(), 30);
}

#[test]
fn oldest_is_overwritten_first() {
    let mut buf = TrailBuffer::new(3, Vec2::ZERO);
    buf.push(p(1));
    buf.push(p(2));
    buf.push(p(3));
    assert_eq!(buf.age_of(2), Some(p(1)));
    buf.push(p(4));
    assert_eq!(buf.age_of(2), Some(p(2)));
    assert_eq!(buf.newest(), p(4));
}

#[test]
fn prefilled_buffer_always_holds_capacity_samples() {
    let fill = Vec2::new(7.0, 7.0);
    let buf = TrailBuffer::new(4, fill);
    assert_eq!(buf.iter_oldest_first().count(), 4);
    assert!(buf.iter_oldest_first().all(|(_, s)| s == fill));
}

#[test]
fn iteration_runs_oldest_to_newest() {
    let mut buf = TrailBuffer::new(4, Vec2::ZERO);
    for i in 0..6 {
        buf.push(p(i));
    }
    let ages: Vec<usize> = buf.iter_oldest_first().map(|(a, _)| a).collect();
    assert_eq!(ages, vec![3, 2, 1, 0]);
    let last = buf.iter_oldest_first().last().map(|(_, s)| s);
    assert_eq!(last, Some(p(5)));
}

#[test]
fn zero_capacity_is_floored_to_one() {
    let mut buf = TrailBuffer::new(0, Vec2::ZERO);
    assert_eq!(buf.capacity(), 1);
    buf.push(p(3));
    assert_eq!(buf.age_of(0), Some(p(3)));
}

#[test]
fn slot_style_interpolates_between_endpoints() {
    let style = TrailStyle {
        head_size: 10.0,
        tail_size: 2.0,
        head_color: [1.0, 0.0, 0.0],
        tail_color: [0.0, 0.0, 1.0],
        head_alpha: 1.0,
        tail_alpha: 0.0,
    };
    let head = style.at(0, 5);
    let mid = style.at(2, 5);
    let tail = style.at(4, 5);
    assert_eq!(head.size, 10.0);
    assert_eq!(tail.size, 2.0);
    assert!((mid.size - 6.0).abs() < 1e-5);
    assert!((mid.color[0] - 0.5).abs() < 1e-5);
    assert!((mid.color[2] - 0.5).abs() < 1e-5);
    assert_eq!(tail.alpha, 0.0);
    assert_eq!(age_fraction(0, 1), 0.0);
}

#[test]
fn cursor_trail_snaps_on_first_contact_then_follows() {
    let cfg = EffectConfig::cursor_trail().trail.expect("trail preset");
    let mut trail = CursorTrail::new(&cfg);
    trail.update(None, 1.0);
    assert_eq!(trail.head(), None);

    let start = Vec2::new(100.0, 50.0);
    trail.update(Some(start), 1.0);
    assert_eq!(trail.head(), Some(start));
    assert!(trail.buffer().iter_oldest_first().all(|(_, s)| s == start));

    let target = Vec2::new(200.0, 50.0);
    trail.update(Some(target), 1.0);
    let head = trail.head().unwrap();
    let expected = start.x + (target.x - start.x) * cfg.follow_rate;
    assert!((head.x - expected).abs() < 1e-3);
    assert_eq!(trail.buffer().newest(), head);
}

#[test]
fn cursor_trail_collapses_into_head_after_pointer_leaves() {
    let cfg = EffectConfig::cursor_trail().trail.unwrap();
    let mut trail = CursorTrail::new(&cfg);
    for i in 0..10 {
        trail.update(Some(Vec2::new(i as f32 * 20.0, 0.0)), 1.0);
    }
    let head = trail.head().unwrap();
    for _ in 0..cfg.capacity {
        trail.update(None, 1.0);
    }
    assert!(trail.buffer().iter_oldest_first().all(|(_, s)| s == head));
}
