//! Raw pointer and scroll capture between ticks.
//!
//! Event callbacks only accumulate; the tick drains both accumulators exactly
//! once, so a tick always sees every delta since the previous one.

use glam::Vec2;

/// Deltas accumulated since the previous tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Drained {
    pub scroll: f32,
    pub pointer: Vec2,
}

#[derive(Clone, Debug)]
pub struct SignalSampler {
    pointer: Option<Vec2>,
    pending_pointer: Vec2,
    last_scroll: f32,
    pending_scroll: f32,
    active: bool,
    idle_deadline: f64,
    idle_timeout: f64,
}

impl SignalSampler {
    pub fn new(idle_timeout: f64, initial_scroll: f32) -> Self {
        Self {
            pointer: None,
            pending_pointer: Vec2::ZERO,
            last_scroll: sanitize(initial_scroll),
            pending_scroll: 0.0,
            active: false,
            idle_deadline: 0.0,
            idle_timeout,
        }
    }

    /// `position` is relative to the surface origin, in logical pixels.
    pub fn capture_pointer(&mut self, position: Vec2, now: f64) {
        if !position.is_finite() {
            return;
        }
        if let Some(previous) = self.pointer {
            self.pending_pointer += position - previous;
        }
        self.pointer = Some(position);
        self.active = true;
        self.idle_deadline = now + self.idle_timeout;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = None;
        self.active = false;
    }

    pub fn capture_scroll(&mut self, offset: f32) {
        let offset = sanitize(offset);
        self.pending_scroll += offset - self.last_scroll;
        self.last_scroll = offset;
    }

    /// Read-then-reset of both accumulators.
    pub fn drain(&mut self) -> Drained {
        Drained {
            scroll: std::mem::take(&mut self.pending_scroll),
            pointer: std::mem::take(&mut self.pending_pointer),
        }
    }

    pub fn expire_idle(&mut self, now: f64) {
        if self.active && now >= self.idle_deadline {
            self.active = false;
        }
    }

    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Pointer position while the pointer is considered active.
    #[inline]
    pub fn active_pointer(&self) -> Option<Vec2> {
        self.pointer.filter(|_| self.active)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn last_scroll(&self) -> f32 {
        self.last_scroll
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
