// Host-side tests for frame timing.

use motion_core::constants::{MAX_FRAME_GAP, NOMINAL_FRAME_SEC};
use motion_core::frame::clamp_dt;
use motion_core::FrameClock;

#[test]
fn first_step_is_zero() {
    let mut clock = FrameClock::new();
    let step = clock.advance(12.5);
    assert_eq!(step.dt, 0.0);
    assert_eq!(step.frame, 1);
}

#[test]
fn nominal_frame_maps_to_one() {
    let mut clock = FrameClock::new();
    clock.advance(1.0);
    let step = clock.advance(1.0 + NOMINAL_FRAME_SEC as f64);
    assert!((step.dt - 1.0).abs() < 1e-3, "dt = {}", step.dt);
}

#[test]
fn backgrounded_gap_is_clamped() {
    let mut clock = FrameClock::new();
    clock.advance(0.0);
    let step = clock.advance(10.0);
    assert_eq!(step.dt, MAX_FRAME_GAP);
    assert!((step.dt_sec - 3.0 * NOMINAL_FRAME_SEC).abs() < 1e-6);
}

#[test]
fn clock_going_backwards_yields_zero() {
    let mut clock = FrameClock::new();
    clock.advance(5.0);
    assert_eq!(clock.advance(4.0).dt, 0.0);
    assert_eq!(clamp_dt(f64::NAN), 0.0);
    assert_eq!(clamp_dt(-1.0), 0.0);
}

#[test]
fn every_step_lies_in_clamp_range() {
    let mut clock = FrameClock::new();
    let mut t = 0.0;
    for gap in [0.0, 0.001, 0.016, 0.033, 0.05, 0.2, 10.0, 0.016] {
        t += gap;
        let dt = clock.advance(t).dt;
        assert!((0.0..=MAX_FRAME_GAP).contains(&dt));
    }
}

#[test]
fn reset_restarts_from_zero_step() {
    let mut clock = FrameClock::new();
    clock.advance(0.0);
    clock.advance(0.016);
    clock.reset();
    assert_eq!(clock.advance(30.0).dt, 0.0);
}

#[test]
fn fps_is_estimated_over_window() {
    let mut clock = FrameClock::new();
    let mut t = 0.0;
    for _ in 0..=60 {
        clock.advance(t);
        t += 1.0 / 60.0;
    }
    assert!(clock.fps() > 50.0 && clock.fps() < 70.0, "fps = {}", clock.fps());
}
