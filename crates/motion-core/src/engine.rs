//! One ambient-motion instance per surface.
//!
//! The host forwards events as they arrive and calls [`MotionEngine::frame`]
//! from its per-frame callback. A frame runs the whole chain in order:
//! drain signals, estimate velocities, step every particle, paint.

use crate::config::EffectConfig;
use crate::constants::{ACTIVITY_FADE_RATE, MAX_FRAME_GAP, NOMINAL_FRAME_SEC};
use crate::error::ConfigError;
use crate::force::{frame_lerp, ForceInput, ForceModel};
use crate::frame::{FrameClock, FrameStep};
use crate::lifecycle::MotionMode;
use crate::particle::ParticleField;
use crate::render::{Frame, Painter, Renderer};
use crate::signal::SignalSampler;
use crate::surface::{Surface, SurfaceChange, SurfaceManager};
use crate::trail::CursorTrail;
use crate::velocity::VelocityEstimator;
use glam::Vec2;

pub struct MotionEngine {
    config: EffectConfig,
    mode: MotionMode,
    surfaces: SurfaceManager,
    signals: SignalSampler,
    scroll_velocity: VelocityEstimator<f32>,
    pointer_velocity: VelocityEstimator<Vec2>,
    field: ParticleField,
    forces: ForceModel,
    trail: Option<CursorTrail>,
    renderer: Renderer,
    clock: FrameClock,
    elapsed: f32,
    activity: f32,
    /// Whether the previous tick saw an active pointer.
    pointer_engaged: bool,
}

impl MotionEngine {
    /// Nothing is sized or seeded until the first successful [`resize`].
    ///
    /// [`resize`]: MotionEngine::resize
    pub fn new(
        config: EffectConfig,
        mode: MotionMode,
        initial_scroll: f32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            mode,
            surfaces: SurfaceManager::new(&config),
            signals: SignalSampler::new(config.idle_timeout_sec, initial_scroll),
            scroll_velocity: VelocityEstimator::new(config.scroll_smoothing),
            pointer_velocity: VelocityEstimator::new(config.pointer_smoothing),
            field: ParticleField::new(config.spawn, config.seed),
            forces: ForceModel::new(&config),
            trail: config.trail.as_ref().map(CursorTrail::new),
            renderer: Renderer::new(&config),
            clock: FrameClock::new(),
            elapsed: 0.0,
            activity: 0.0,
            pointer_engaged: false,
            config,
        })
    }

    /// Apply a container measurement. The first non-empty one seeds the field.
    pub fn resize(&mut self, size: Vec2, dpr: f32) -> SurfaceChange {
        let change = self.surfaces.on_resize(size, dpr);
        match change {
            SurfaceChange::Initialized { surface, count }
            | SurfaceChange::Regenerated { surface, count } => {
                self.field.regenerate_all(surface.width, surface.height);
                self.field.reconcile(count);
                log::debug!(
                    "[{}] seeded {} particles for {:.0}x{:.0}@{:.2}",
                    self.config.kind.name(),
                    count,
                    surface.width,
                    surface.height,
                    surface.dpr
                );
            }
            SurfaceChange::Reconciled { surface, count } => {
                self.field.set_bounds(surface.width, surface.height);
                self.field.reconcile(count);
                log::debug!(
                    "[{}] reconciled to {} particles",
                    self.config.kind.name(),
                    count
                );
            }
            SurfaceChange::Deferred => {
                log::debug!("[{}] container has no size yet", self.config.kind.name());
            }
            SurfaceChange::Unchanged => {}
        }
        change
    }

    pub fn pointer_move(&mut self, position: Vec2, now: f64) {
        self.signals.capture_pointer(position, now);
    }

    pub fn pointer_leave(&mut self) {
        self.signals.pointer_leave();
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.signals.capture_scroll(offset);
    }

    /// One host frame: time, simulate, paint. Returns `None` until the
    /// surface has a size.
    pub fn frame<P: Painter + ?Sized>(&mut self, now: f64, painter: &mut P) -> Option<FrameStep> {
        self.surfaces.surface()?;
        let step = self.clock.advance(now);
        self.signals.expire_idle(now);
        self.tick(step.dt);
        self.render(painter);
        Some(step)
    }

    /// Advance the simulation by `dt` nominal frames (clamped).
    pub fn tick(&mut self, dt: f32) {
        let Some(surface) = self.surfaces.surface().copied() else {
            return;
        };
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_GAP)
        } else {
            0.0
        };

        let drained = self.signals.drain();
        self.scroll_velocity.update(drained.scroll, dt);
        self.pointer_velocity.update(drained.pointer, dt);

        let dynamics = self.mode.dynamics();
        let pointer = if dynamics {
            self.signals.active_pointer()
        } else {
            None
        };
        self.elapsed += dt * NOMINAL_FRAME_SEC;
        let input = ForceInput {
            dt,
            elapsed: self.elapsed,
            bounds: surface.size(),
            pointer,
            dynamics,
        };

        let mut reseeded = 0usize;
        for i in 0..self.field.len() {
            let particle = &mut self.field.particles_mut()[i];
            self.forces.step(particle, &input);
            if !particle.is_finite() {
                self.field.reseed(i);
                reseeded += 1;
            }
        }
        if reseeded > 0 {
            log::warn!(
                "[{}] reseeded {} non-finite particles",
                self.config.kind.name(),
                reseeded
            );
        }

        if let Some(trail) = &mut self.trail {
            // Fresh contact snaps the head to the pointer instead of sweeping
            // in from wherever it was left.
            if pointer.is_some() && !self.pointer_engaged {
                trail.reset();
            }
            trail.update(pointer, dt);
        }
        self.pointer_engaged = pointer.is_some();
        let target = if pointer.is_some() { 1.0 } else { 0.0 };
        self.activity += (target - self.activity) * frame_lerp(ACTIVITY_FADE_RATE, dt);
        if self.activity < 1e-3 {
            self.activity = 0.0;
        }
    }

    /// Paint the current state without advancing it.
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P) {
        let Some(surface) = self.surfaces.surface() else {
            return;
        };
        let streak = if self.mode.dynamics() {
            self.forces.streak(self.scroll_velocity.value())
        } else {
            None
        };
        let frame = Frame {
            surface,
            particles: self.field.particles(),
            trail: self.trail.as_ref(),
            streak,
            activity: self.activity,
            pointer_speed: self.pointer_velocity.speed(),
        };
        self.renderer.render(&frame, painter);
    }

    /// Drop the timing baseline, e.g. after the host suspended the loop.
    pub fn suspend(&mut self) {
        self.clock.reset();
    }

    #[inline]
    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    #[inline]
    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    #[inline]
    pub fn surface(&self) -> Option<&Surface> {
        self.surfaces.surface()
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    #[inline]
    pub fn trail(&self) -> Option<&CursorTrail> {
        self.trail.as_ref()
    }

    #[inline]
    pub fn signals(&self) -> &SignalSampler {
        &self.signals
    }

    #[inline]
    pub fn scroll_velocity(&self) -> f32 {
        self.scroll_velocity.value()
    }

    #[inline]
    pub fn pointer_velocity(&self) -> Vec2 {
        self.pointer_velocity.value()
    }

    #[inline]
    pub fn activity(&self) -> f32 {
        self.activity
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }
}
