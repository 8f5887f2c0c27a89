//! Smoothed, decaying velocity estimates from per-tick input deltas.

use crate::constants::*;
use crate::error::{positive, unit_interval, ConfigError};
use glam::Vec2;
use std::ops::{Add, Mul, Sub};

/// A signal that can be smoothed: scalar scroll offsets or 2D pointer motion.
pub trait SignalValue:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    const ZERO: Self;
    fn magnitude(self) -> f32;
}

impl SignalValue for f32 {
    const ZERO: Self = 0.0;
    #[inline]
    fn magnitude(self) -> f32 {
        self.abs()
    }
}

impl SignalValue for Vec2 {
    const ZERO: Self = Vec2::ZERO;
    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothing {
    /// EMA weight given to the raw sample.
    pub alpha: f32,
    /// Per-tick multiplier applied while input is below `raw_threshold`.
    pub decay: f32,
    /// Below this magnitude a decaying value snaps to zero.
    pub epsilon: f32,
    pub raw_threshold: f32,
    /// Floor on dt (nominal frames) before dividing.
    pub min_dt: f32,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            alpha: VELOCITY_ALPHA,
            decay: VELOCITY_DECAY,
            epsilon: VELOCITY_EPSILON,
            raw_threshold: VELOCITY_RAW_THRESHOLD,
            min_dt: VELOCITY_MIN_DT,
        }
    }
}

impl Smoothing {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("alpha", self.alpha)?;
        unit_interval("decay", self.decay)?;
        positive("epsilon", self.epsilon)?;
        positive("min_dt", self.min_dt)?;
        if self.decay >= 1.0 {
            return Err(ConfigError::OutOfRange {
                name: "decay",
                value: self.decay,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }

    /// Upper bound on idle ticks for a value of magnitude `v0` to reach zero.
    pub fn ticks_to_rest(&self, v0: f32) -> u32 {
        if v0 < self.epsilon {
            return 1;
        }
        ((self.epsilon / v0).ln() / self.decay.ln()).ceil().max(1.0) as u32
    }
}

#[derive(Clone, Debug)]
pub struct VelocityEstimator<T: SignalValue> {
    params: Smoothing,
    smoothed: T,
    raw: T,
}

impl<T: SignalValue> VelocityEstimator<T> {
    pub fn new(params: Smoothing) -> Self {
        Self {
            params,
            smoothed: T::ZERO,
            raw: T::ZERO,
        }
    }

    /// Fold one tick's drained delta into the estimate and return it.
    pub fn update(&mut self, delta: T, dt: f32) -> T {
        let dt = if dt.is_finite() { dt } else { 0.0 };
        self.raw = delta * (1.0 / dt.max(self.params.min_dt));
        if self.raw.magnitude() > self.params.raw_threshold {
            let a = self.params.alpha;
            self.smoothed = self.smoothed * (1.0 - a) + self.raw * a;
        } else {
            self.smoothed = self.smoothed * self.params.decay;
            if self.smoothed.magnitude() < self.params.epsilon {
                self.smoothed = T::ZERO;
            }
        }
        self.smoothed
    }

    #[inline]
    pub fn value(&self) -> T {
        self.smoothed
    }

    /// Last unsmoothed sample, per nominal frame.
    #[inline]
    pub fn raw(&self) -> T {
        self.raw
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.smoothed.magnitude()
    }

    #[inline]
    pub fn is_resting(&self) -> bool {
        self.smoothed.magnitude() == 0.0
    }
}
