//! Per-particle, per-tick forces: drift with edge wrap, pointer influence,
//! scroll-velocity streaks and visual smoothing.

use crate::config::{EffectConfig, PointerConfig, StreakConfig};
use crate::constants::{DISTANCE_EPSILON, TWINKLE_RATE};
use crate::particle::Particle;
use glam::Vec2;

/// Everything a single particle update needs from the rest of the tick.
#[derive(Clone, Copy, Debug)]
pub struct ForceInput {
    /// Elapsed time in nominal frames, already clamped.
    pub dt: f32,
    /// Seconds since mount; drives the twinkle phase.
    pub elapsed: f32,
    pub bounds: Vec2,
    pub pointer: Option<Vec2>,
    /// When false, positions and velocities are frozen and targets stay at
    /// their base values.
    pub dynamics: bool,
}

/// Normalized influence: 1 at the source, 0 at or beyond `radius`.
#[inline]
pub fn falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        return 0.0;
    }
    (1.0 - distance / radius).clamp(0.0, 1.0)
}

/// Wrap a position that left the surface (plus margin) to the opposite edge.
#[inline]
pub fn wrap_position(position: Vec2, bounds: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(position.x, bounds.x, margin),
        wrap_axis(position.y, bounds.y, margin),
    )
}

#[inline]
fn wrap_axis(v: f32, extent: f32, margin: f32) -> f32 {
    if v > extent + margin {
        -margin
    } else if v < -margin {
        extent + margin
    } else {
        v
    }
}

/// Fraction of `rate` to apply for `dt` nominal frames; equals `rate` at dt=1.
#[inline]
pub(crate) fn frame_lerp(rate: f32, dt: f32) -> f32 {
    (1.0 - (1.0 - rate).powf(dt)).clamp(0.0, 1.0)
}

#[derive(Clone, Debug)]
pub struct ForceModel {
    pointer: Option<PointerConfig>,
    streaks: Option<StreakConfig>,
    margin: f32,
    visual_lerp: f32,
    twinkle: f32,
}

impl ForceModel {
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            pointer: config.pointer,
            streaks: config.streaks,
            margin: config.wrap_margin,
            visual_lerp: config.visual_lerp,
            twinkle: config.twinkle,
        }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Streak offset for the current scroll velocity, drawn opposite the
    /// direction of travel. `None` below the threshold.
    pub fn streak(&self, velocity: f32) -> Option<Vec2> {
        let cfg = self.streaks.as_ref()?;
        let speed = velocity.abs();
        if !speed.is_finite() || speed <= cfg.threshold {
            return None;
        }
        let length = (speed / cfg.norm_factor).min(1.0) * cfg.max_length;
        // Scroll offset grows downward (+y); the streak trails behind it.
        Some(Vec2::new(0.0, -velocity.signum() * length))
    }

    pub fn step(&self, p: &mut Particle, input: &ForceInput) {
        let mut target_opacity = p.base_opacity;
        let mut target_size = p.base_size;

        if input.dynamics {
            if self.twinkle > 0.0 {
                let wave = 0.5 * (1.0 + (p.phase + input.elapsed * TWINKLE_RATE).sin());
                target_opacity *= 1.0 - self.twinkle * wave;
            }

            if let Some(cfg) = &self.pointer {
                if let Some(pointer) = input.pointer {
                    self.apply_pointer(
                        p,
                        cfg,
                        pointer,
                        input.dt,
                        &mut target_opacity,
                        &mut target_size,
                    );
                }
                let relax = frame_lerp(cfg.relax_rate, input.dt);
                p.velocity = p.velocity.lerp(p.base_velocity, relax);
            }

            p.position += p.velocity * input.dt;
            p.position = wrap_position(p.position, input.bounds, self.margin);
        }

        let t = frame_lerp(self.visual_lerp, input.dt);
        p.opacity += (target_opacity - p.opacity) * t;
        p.size += (target_size - p.size) * t;
    }

    fn apply_pointer(
        &self,
        p: &mut Particle,
        cfg: &PointerConfig,
        pointer: Vec2,
        dt: f32,
        target_opacity: &mut f32,
        target_size: &mut f32,
    ) {
        let offset = pointer - p.position;
        let distance = offset.length();
        let f = falloff(distance, cfg.influence_radius);
        if f <= 0.0 {
            return;
        }
        *target_opacity += (p.max_opacity - *target_opacity) * f;
        *target_size *= 1.0 + cfg.size_boost * f;

        let direction = offset / distance.max(DISTANCE_EPSILON);
        p.velocity += direction * cfg.strength * f * f * dt;
        let speed = p.velocity.length();
        if speed > cfg.max_speed {
            p.velocity *= cfg.max_speed / speed;
        }
    }
}
