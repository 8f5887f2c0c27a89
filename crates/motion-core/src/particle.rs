//! Fixed-size particle collections, regenerated wholesale on drastic resizes.

use crate::config::SpawnConfig;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Parallax layer in [0, 1]; nearer particles move faster and look larger.
    pub depth: f32,
    pub base_velocity: Vec2,
    pub velocity: Vec2,
    pub base_size: f32,
    pub size: f32,
    pub base_opacity: f32,
    pub opacity: f32,
    pub max_opacity: f32,
    pub color: [f32; 3],
    pub phase: f32,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, spawn: &SpawnConfig) -> Self {
        let depth: f32 = rng.gen();
        let parallax = 0.5 + 0.5 * depth;
        let heading = spawn.heading.unwrap_or_else(|| rng.gen_range(0.0..TAU));
        let speed = spawn.speed.sample(rng) * parallax;
        let base_velocity = Vec2::from_angle(heading) * speed;
        let base_size = spawn.size.sample(rng) * parallax;
        let base_opacity = spawn.opacity.sample(rng);
        let color = spawn.palette.choose(rng).copied().unwrap_or([1.0, 1.0, 1.0]);
        Self {
            position: Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y),
            depth,
            base_velocity,
            velocity: base_velocity,
            base_size,
            size: base_size,
            base_opacity,
            opacity: base_opacity,
            max_opacity: spawn.max_opacity,
            color,
            phase: rng.gen_range(0.0..TAU),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.size.is_finite()
            && self.opacity.is_finite()
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    spawn: SpawnConfig,
    rng: StdRng,
    bounds: Vec2,
    generation: u64,
}

impl ParticleField {
    pub fn new(spawn: SpawnConfig, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            spawn,
            rng: StdRng::seed_from_u64(seed),
            bounds: Vec2::ZERO,
            generation: 0,
        }
    }

    /// Grow by appending fresh particles, or truncate the highest indices.
    pub fn reconcile(&mut self, count: usize) {
        if count < self.particles.len() {
            self.particles.truncate(count);
            return;
        }
        let missing = count - self.particles.len();
        self.particles.reserve(missing);
        for _ in 0..missing {
            let p = Particle::random(&mut self.rng, self.bounds, &self.spawn);
            self.particles.push(p);
        }
    }

    /// Reseed every particle for a new surface size, keeping the count.
    pub fn regenerate_all(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
        let count = self.particles.len();
        self.particles.clear();
        self.generation += 1;
        self.reconcile(count);
        log::debug!(
            "[field] regenerated generation={} count={} bounds=({:.0},{:.0})",
            self.generation,
            count,
            width,
            height
        );
    }

    /// Update bounds without touching existing particles; wrapping brings
    /// stragglers back inside on their next tick.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }

    pub fn reseed(&mut self, index: usize) {
        if index < self.particles.len() {
            self.particles[index] = Particle::random(&mut self.rng, self.bounds, &self.spawn);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Bumped on every full reseed; indices are stable within a generation.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
