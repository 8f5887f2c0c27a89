//! Fixed-capacity ring buffer of recent head positions, and the cursor trail
//! that feeds it.

use crate::config::TrailConfig;
use crate::force::frame_lerp;
use glam::Vec2;

/// Ring buffer that always holds exactly `capacity` samples; the oldest is
/// overwritten first.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    slots: Vec<Vec2>,
    head: usize,
    pushed: u64,
}

impl TrailBuffer {
    /// Capacity is floored at 1. Every slot starts at `fill`.
    pub fn new(capacity: usize, fill: Vec2) -> Self {
        Self {
            slots: vec![fill; capacity.max(1)],
            head: 0,
            pushed: 0,
        }
    }

    pub fn push(&mut self, position: Vec2) {
        let capacity = self.slots.len();
        self.slots[self.head % capacity] = position;
        self.head = (self.head + 1) % capacity;
        self.pushed += 1;
    }

    /// Sample of the given age; 0 is the newest.
    pub fn age_of(&self, age: usize) -> Option<Vec2> {
        let capacity = self.slots.len();
        if age >= capacity {
            return None;
        }
        // head is kept in [0, capacity) so adding capacity keeps this non-negative.
        let slot = (self.head + capacity - 1 - age) % capacity;
        Some(self.slots[slot])
    }

    /// Oldest to newest, the order in which a trail is painted.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = (usize, Vec2)> + '_ {
        let capacity = self.slots.len();
        (0..capacity).rev().filter_map(move |age| self.age_of(age).map(|p| (age, p)))
    }

    /// Overwrite every slot, e.g. when the pointer first appears.
    pub fn fill(&mut self, position: Vec2) {
        self.slots.iter_mut().for_each(|s| *s = position);
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn newest(&self) -> Vec2 {
        self.age_of(0).unwrap_or(Vec2::ZERO)
    }

    /// Total pushes since construction.
    #[inline]
    pub fn pushed(&self) -> u64 {
        self.pushed
    }
}

/// `age / (capacity - 1)`, with a single-slot buffer treated as all head.
#[inline]
pub fn age_fraction(age: usize, capacity: usize) -> f32 {
    if capacity <= 1 {
        0.0
    } else {
        (age as f32 / (capacity - 1) as f32).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotStyle {
    pub size: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

/// Endpoint values interpolated along the trail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailStyle {
    pub head_size: f32,
    pub tail_size: f32,
    pub head_color: [f32; 3],
    pub tail_color: [f32; 3],
    pub head_alpha: f32,
    pub tail_alpha: f32,
}

impl TrailStyle {
    pub fn at(&self, age: usize, capacity: usize) -> SlotStyle {
        let t = age_fraction(age, capacity);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        SlotStyle {
            size: mix(self.head_size, self.tail_size),
            color: [
                mix(self.head_color[0], self.tail_color[0]),
                mix(self.head_color[1], self.tail_color[1]),
                mix(self.head_color[2], self.tail_color[2]),
            ],
            alpha: mix(self.head_alpha, self.tail_alpha),
        }
    }
}

impl From<&TrailConfig> for TrailStyle {
    fn from(cfg: &TrailConfig) -> Self {
        Self {
            head_size: cfg.head_size,
            tail_size: cfg.tail_size,
            head_color: cfg.head_color,
            tail_color: cfg.tail_color,
            head_alpha: cfg.head_alpha,
            tail_alpha: cfg.tail_alpha,
        }
    }
}

/// A head that chases the pointer and records where it has been.
#[derive(Clone, Debug)]
pub struct CursorTrail {
    buffer: TrailBuffer,
    style: TrailStyle,
    follow_rate: f32,
    speed_norm: f32,
    head: Option<Vec2>,
}

impl CursorTrail {
    pub fn new(cfg: &TrailConfig) -> Self {
        Self {
            buffer: TrailBuffer::new(cfg.capacity, Vec2::ZERO),
            style: TrailStyle::from(cfg),
            follow_rate: cfg.follow_rate,
            speed_norm: cfg.speed_norm,
            head: None,
        }
    }

    /// Advance the head toward `pointer` and record it. Once the pointer is
    /// gone the head holds still, so the tail collapses into it.
    pub fn update(&mut self, pointer: Option<Vec2>, dt: f32) {
        let next = match (self.head, pointer) {
            (None, None) => return,
            (None, Some(p)) => {
                self.buffer.fill(p);
                p
            }
            (Some(h), Some(p)) => h.lerp(p, frame_lerp(self.follow_rate, dt)),
            (Some(h), None) => h,
        };
        self.head = Some(next);
        self.buffer.push(next);
    }

    /// Head swell in [0, 1] for a pointer speed in px per nominal frame.
    pub fn swell(&self, pointer_speed: f32) -> f32 {
        (pointer_speed / self.speed_norm).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn head(&self) -> Option<Vec2> {
        self.head
    }

    #[inline]
    pub fn buffer(&self) -> &TrailBuffer {
        &self.buffer
    }

    #[inline]
    pub fn style(&self) -> &TrailStyle {
        &self.style
    }

    pub fn reset(&mut self) {
        self.head = None;
    }
}
