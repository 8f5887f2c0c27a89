//! Frame timing: wall-clock deltas normalized to nominal frames.

use crate::constants::{FPS_WINDOW_SEC, MAX_FRAME_GAP, NOMINAL_FRAME_SEC};

/// Timing for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStep {
    /// Clamped delta in nominal frames (1.0 at 60 Hz).
    pub dt: f32,
    /// Clamped delta in seconds.
    pub dt_sec: f32,
    pub frame: u64,
}

/// Clamp a raw wall-clock gap to `[0, MAX_FRAME_GAP]` nominal frames.
#[inline]
pub fn clamp_dt(raw_sec: f64) -> f32 {
    if !raw_sec.is_finite() || raw_sec <= 0.0 {
        return 0.0;
    }
    ((raw_sec as f32) / NOMINAL_FRAME_SEC).min(MAX_FRAME_GAP)
}

#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last: Option<f64>,
    frame: u64,
    fps: f32,
    fps_frames: u64,
    fps_window_start: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now` (seconds on any monotonic timebase). The first call
    /// yields a zero step.
    pub fn advance(&mut self, now: f64) -> FrameStep {
        let raw = match self.last {
            Some(last) => now - last,
            None => {
                self.fps_window_start = now;
                0.0
            }
        };
        self.last = Some(now);
        self.frame += 1;

        let window = now - self.fps_window_start;
        if window >= FPS_WINDOW_SEC {
            self.fps = (self.frame - self.fps_frames) as f32 / window as f32;
            self.fps_frames = self.frame;
            self.fps_window_start = now;
        }

        let dt = clamp_dt(raw);
        FrameStep {
            dt,
            dt_sec: dt * NOMINAL_FRAME_SEC,
            frame: self.frame,
        }
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Forget the previous timestamp so the next step starts from zero, e.g.
    /// after the loop was suspended.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
