//! Stateless painting of the current field, trail and streaks.
//!
//! The host provides the paint primitives through [`Painter`]; everything here
//! draws in logical units.

use crate::config::{BodyStyle, ConnectionConfig, EffectConfig, StreakConfig};
use crate::particle::Particle;
use crate::surface::Surface;
use crate::trail::CursorTrail;
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

/// Paint primitives supplied by the host. Colors are linear RGB in [0, 1].
pub trait Painter {
    fn clear(&mut self, width: f32, height: f32);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 3], alpha: f32);
    fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 3], alpha: f32);
    /// Radial gradient from `color` at `alpha` in the center to transparent.
    fn glow(&mut self, center: Vec2, radius: f32, color: [f32; 3], alpha: f32);
}

/// Snapshot of everything one frame paints.
pub struct Frame<'a> {
    pub surface: &'a Surface,
    pub particles: &'a [Particle],
    pub trail: Option<&'a CursorTrail>,
    /// Offset applied to every particle for the streak, if any.
    pub streak: Option<Vec2>,
    /// Trail visibility in [0, 1]; fades out when the pointer idles.
    pub activity: f32,
    pub pointer_speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

const HIGHLIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// All pairs closer than `max_distance`, sorted by index.
///
/// Particles are bucketed into a grid of `max_distance` cells so only
/// neighbouring cells are compared.
pub fn connection_pairs(particles: &[Particle], max_distance: f32) -> Vec<Connection> {
    let mut out = Vec::new();
    if max_distance <= 0.0 || particles.len() < 2 {
        return out;
    }
    let cell_of = |p: Vec2| -> (i32, i32) {
        (
            (p.x / max_distance).floor() as i32,
            (p.y / max_distance).floor() as i32,
        )
    };

    let mut grid: FnvHashMap<(i32, i32), SmallVec<[u32; 8]>> = FnvHashMap::default();
    for (i, p) in particles.iter().enumerate() {
        if p.position.is_finite() {
            grid.entry(cell_of(p.position)).or_default().push(i as u32);
        }
    }

    // Own cell plus four forward neighbours visits every adjacent pair once.
    const FORWARD: [(i32, i32); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];
    let max_sq = max_distance * max_distance;
    let push_if_close = |a: u32, b: u32, out: &mut Vec<Connection>| {
        let (a, b) = (a as usize, b as usize);
        let d_sq = particles[a].position.distance_squared(particles[b].position);
        if d_sq < max_sq {
            out.push(Connection {
                a: a.min(b),
                b: a.max(b),
                distance: d_sq.sqrt(),
            });
        }
    };

    for (&(cx, cy), members) in &grid {
        for (k, &a) in members.iter().enumerate() {
            for &b in &members[k + 1..] {
                push_if_close(a, b, &mut out);
            }
        }
        for (dx, dy) in FORWARD {
            if let Some(neighbours) = grid.get(&(cx + dx, cy + dy)) {
                for &a in members {
                    for &b in neighbours {
                        push_if_close(a, b, &mut out);
                    }
                }
            }
        }
    }
    out.sort_unstable_by_key(|c| (c.a, c.b));
    out
}

/// Effect-level paint settings. Holds no frame-to-frame state.
#[derive(Clone, Debug)]
pub struct Renderer {
    connections: Option<ConnectionConfig>,
    streaks: Option<StreakConfig>,
    body: BodyStyle,
}

impl Renderer {
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            connections: config.connections,
            streaks: config.streaks,
            body: config.body,
        }
    }

    /// Clear, connections, trail and streaks, then particle bodies on top.
    pub fn render<P: Painter + ?Sized>(&self, frame: &Frame<'_>, painter: &mut P) {
        painter.clear(frame.surface.width, frame.surface.height);
        self.paint_connections(frame, painter);
        self.paint_trail(frame, painter);
        self.paint_streaks(frame, painter);
        self.paint_bodies(frame, painter);
    }

    fn paint_connections<P: Painter + ?Sized>(&self, frame: &Frame<'_>, painter: &mut P) {
        let Some(cfg) = &self.connections else {
            return;
        };
        for c in connection_pairs(frame.particles, cfg.distance) {
            let alpha = cfg.max_opacity * (1.0 - c.distance / cfg.distance);
            if alpha <= 0.0 {
                continue;
            }
            painter.line(
                frame.particles[c.a].position,
                frame.particles[c.b].position,
                cfg.width,
                cfg.color,
                alpha,
            );
        }
    }

    fn paint_trail<P: Painter + ?Sized>(&self, frame: &Frame<'_>, painter: &mut P) {
        let Some(trail) = frame.trail else {
            return;
        };
        if trail.head().is_none() || frame.activity <= 0.0 {
            return;
        }
        let buffer = trail.buffer();
        let capacity = buffer.capacity();
        let swell = 1.0 + 0.5 * trail.swell(frame.pointer_speed);
        for (age, position) in buffer.iter_oldest_first() {
            let style = trail.style().at(age, capacity);
            let alpha = style.alpha * frame.activity;
            if alpha <= 0.0 {
                continue;
            }
            let size = if age == 0 { style.size * swell } else { style.size };
            painter.circle(position, size, style.color, alpha);
        }
    }

    fn paint_streaks<P: Painter + ?Sized>(&self, frame: &Frame<'_>, painter: &mut P) {
        let (Some(cfg), Some(offset)) = (&self.streaks, frame.streak) else {
            return;
        };
        for p in frame.particles {
            let tail = p.position + offset * (0.5 + 0.5 * p.depth);
            painter.line(
                p.position,
                tail,
                cfg.width * p.size.max(0.5),
                p.color,
                p.opacity * cfg.opacity,
            );
        }
    }

    fn paint_bodies<P: Painter + ?Sized>(&self, frame: &Frame<'_>, painter: &mut P) {
        let body = &self.body;
        for p in frame.particles {
            if p.opacity <= 0.0 || p.size <= 0.0 {
                continue;
            }
            if body.glow_scale > 0.0 {
                painter.glow(
                    p.position,
                    p.size * body.glow_scale,
                    p.color,
                    p.opacity * body.glow_alpha,
                );
            }
            painter.circle(p.position, p.size, p.color, p.opacity);
            if body.highlight {
                let offset = Vec2::splat(-0.3 * p.size);
                painter.circle(
                    p.position + offset,
                    p.size * 0.35,
                    HIGHLIGHT_COLOR,
                    p.opacity * 0.6,
                );
            }
        }
    }
}
