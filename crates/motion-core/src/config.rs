//! Per-effect configuration.
//!
//! Each effect is a preset of the same engine. Values are fixed when an engine
//! is built; there is no runtime tuning protocol.

use crate::constants::*;
use crate::error::{positive, unit_interval, within, ConfigError};
use crate::surface::DeviceClass;
use crate::velocity::Smoothing;
use rand::Rng;

/// Which ambient effect a surface runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Constellation,
    CursorTrail,
    ScrollStreaks,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [
        EffectKind::Constellation,
        EffectKind::CursorTrail,
        EffectKind::ScrollStreaks,
    ];

    /// Parse the name used in markup (`data-ambient="..."`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "constellation" => Some(EffectKind::Constellation),
            "cursor-trail" | "trail" => Some(EffectKind::CursorTrail),
            "scroll-streaks" | "streaks" => Some(EffectKind::ScrollStreaks),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Constellation => "constellation",
            EffectKind::CursorTrail => "cursor-trail",
            EffectKind::ScrollStreaks => "scroll-streaks",
        }
    }
}

/// Closed interval sampled uniformly when particles are seeded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn from_pair(pair: [f32; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ConfigError::InvertedSpan(name));
        }
        Ok(())
    }
}

/// How many particles a surface of a given area holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    pub area_per_particle: f32,
    pub min_count: usize,
    pub max_count: usize,
}

impl Density {
    pub fn count_for_area(&self, area: f32) -> usize {
        let raw = (area / self.area_per_particle).round();
        let raw = if raw.is_finite() && raw > 0.0 { raw as usize } else { 0 };
        raw.clamp(self.min_count, self.max_count)
    }

    fn validate(&self, class: &'static str) -> Result<(), ConfigError> {
        positive("area_per_particle", self.area_per_particle)?;
        if self.min_count > self.max_count {
            return Err(ConfigError::DensityBounds {
                class,
                min: self.min_count,
                max: self.max_count,
            });
        }
        Ok(())
    }
}

/// Ranges used when a particle is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnConfig {
    pub speed: Span,
    pub size: Span,
    pub opacity: Span,
    pub max_opacity: f32,
    /// Fixed drift heading in radians; `None` draws a random heading.
    pub heading: Option<f32>,
    pub palette: &'static [[f32; 3]],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerConfig {
    pub influence_radius: f32,
    /// Impulse scale; positive attracts toward the pointer, negative repels.
    pub strength: f32,
    /// Size multiplier added at full falloff.
    pub size_boost: f32,
    pub max_speed: f32,
    /// Per-frame rate at which velocity relaxes back to the base drift.
    pub relax_rate: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionConfig {
    pub distance: f32,
    pub max_opacity: f32,
    pub width: f32,
    pub color: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreakConfig {
    pub threshold: f32,
    pub norm_factor: f32,
    pub max_length: f32,
    pub width: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailConfig {
    pub capacity: usize,
    pub follow_rate: f32,
    pub head_size: f32,
    pub tail_size: f32,
    pub head_color: [f32; 3],
    pub tail_color: [f32; 3],
    pub head_alpha: f32,
    pub tail_alpha: f32,
    pub speed_norm: f32,
}

/// Layered particle body: glow, core, highlight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyStyle {
    /// Glow radius as a multiple of the core radius; 0 skips the glow layer.
    pub glow_scale: f32,
    pub glow_alpha: f32,
    pub highlight: bool,
}

/// What to do when the host asks for reduced motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReducedMotionPolicy {
    /// Paint one frame and never tick.
    StaticFrame,
    /// Keep ticking with velocity-driven dynamics disabled.
    Calm,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    pub kind: EffectKind,
    pub seed: u64,
    pub compact: Density,
    pub regular: Density,
    pub spawn: SpawnConfig,
    pub pointer: Option<PointerConfig>,
    pub connections: Option<ConnectionConfig>,
    pub streaks: Option<StreakConfig>,
    pub trail: Option<TrailConfig>,
    pub scroll_smoothing: Smoothing,
    pub pointer_smoothing: Smoothing,
    pub visual_lerp: f32,
    /// Opacity breathing amplitude in [0, 1]; 0 disables.
    pub twinkle: f32,
    pub wrap_margin: f32,
    pub idle_timeout_sec: f64,
    pub body: BodyStyle,
    pub reduced_motion: ReducedMotionPolicy,
    pub requires_fine_pointer: bool,
}

const COOL_PALETTE: &[[f32; 3]] = &[
    [0.62, 0.78, 1.0],
    [0.80, 0.86, 1.0],
    [0.55, 0.95, 0.90],
];

const WARM_PALETTE: &[[f32; 3]] = &[[1.0, 0.86, 0.70], [1.0, 0.74, 0.62]];

const PALE_PALETTE: &[[f32; 3]] = &[[0.92, 0.94, 1.0], [0.78, 0.84, 0.96]];

impl EffectConfig {
    pub fn for_kind(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Constellation => Self::constellation(),
            EffectKind::CursorTrail => Self::cursor_trail(),
            EffectKind::ScrollStreaks => Self::scroll_streaks(),
        }
    }

    pub fn constellation() -> Self {
        Self {
            kind: EffectKind::Constellation,
            seed: DEFAULT_SEED,
            compact: Density {
                area_per_particle: CONSTELLATION_AREA_PER_PARTICLE * 1.4,
                min_count: 12,
                max_count: CONSTELLATION_COMPACT_MAX,
            },
            regular: Density {
                area_per_particle: CONSTELLATION_AREA_PER_PARTICLE,
                min_count: 24,
                max_count: CONSTELLATION_REGULAR_MAX,
            },
            spawn: SpawnConfig {
                speed: Span::from_pair(CONSTELLATION_SPEED),
                size: Span::from_pair(CONSTELLATION_SIZE),
                opacity: Span::from_pair(CONSTELLATION_OPACITY),
                max_opacity: CONSTELLATION_MAX_OPACITY,
                heading: None,
                palette: COOL_PALETTE,
            },
            pointer: Some(PointerConfig {
                influence_radius: CONSTELLATION_INFLUENCE_RADIUS,
                strength: CONSTELLATION_ATTRACTION,
                size_boost: 0.8,
                max_speed: CONSTELLATION_MAX_SPEED,
                relax_rate: 0.02,
            }),
            connections: Some(ConnectionConfig {
                distance: CONSTELLATION_CONNECT_DISTANCE,
                max_opacity: CONSTELLATION_LINE_OPACITY,
                width: 0.6,
                color: [0.70, 0.82, 1.0],
            }),
            streaks: None,
            trail: None,
            scroll_smoothing: Smoothing::default(),
            pointer_smoothing: Smoothing {
                alpha: CONSTELLATION_ALPHA,
                ..Smoothing::default()
            },
            visual_lerp: CONSTELLATION_VISUAL_LERP,
            twinkle: 0.25,
            wrap_margin: WRAP_MARGIN,
            idle_timeout_sec: POINTER_IDLE_TIMEOUT_SEC,
            body: BodyStyle {
                glow_scale: 3.0,
                glow_alpha: 0.25,
                highlight: false,
            },
            reduced_motion: ReducedMotionPolicy::StaticFrame,
            requires_fine_pointer: false,
        }
    }

    pub fn cursor_trail() -> Self {
        Self {
            kind: EffectKind::CursorTrail,
            seed: DEFAULT_SEED,
            compact: Density {
                area_per_particle: TRAIL_DUST_AREA_PER_PARTICLE,
                min_count: 0,
                max_count: TRAIL_DUST_MAX / 2,
            },
            regular: Density {
                area_per_particle: TRAIL_DUST_AREA_PER_PARTICLE,
                min_count: 0,
                max_count: TRAIL_DUST_MAX,
            },
            spawn: SpawnConfig {
                speed: Span::new(0.05, 0.2),
                size: Span::new(0.6, 1.6),
                opacity: Span::new(0.1, 0.3),
                max_opacity: 0.8,
                heading: None,
                palette: WARM_PALETTE,
            },
            pointer: Some(PointerConfig {
                influence_radius: 90.0,
                strength: -0.08,
                size_boost: 0.5,
                max_speed: 2.0,
                relax_rate: 0.03,
            }),
            connections: None,
            streaks: None,
            trail: Some(TrailConfig {
                capacity: TRAIL_CAPACITY,
                follow_rate: TRAIL_FOLLOW_RATE,
                head_size: TRAIL_HEAD_SIZE,
                tail_size: TRAIL_TAIL_SIZE,
                head_color: [1.0, 0.90, 0.75],
                tail_color: [0.95, 0.45, 0.55],
                head_alpha: 0.9,
                tail_alpha: 0.0,
                speed_norm: TRAIL_SPEED_NORM,
            }),
            scroll_smoothing: Smoothing::default(),
            pointer_smoothing: Smoothing {
                alpha: TRAIL_ALPHA,
                ..Smoothing::default()
            },
            visual_lerp: TRAIL_VISUAL_LERP,
            twinkle: 0.0,
            wrap_margin: WRAP_MARGIN,
            idle_timeout_sec: POINTER_IDLE_TIMEOUT_SEC,
            body: BodyStyle {
                glow_scale: 0.0,
                glow_alpha: 0.0,
                highlight: false,
            },
            reduced_motion: ReducedMotionPolicy::StaticFrame,
            requires_fine_pointer: true,
        }
    }

    pub fn scroll_streaks() -> Self {
        Self {
            kind: EffectKind::ScrollStreaks,
            seed: DEFAULT_SEED,
            compact: Density {
                area_per_particle: STREAK_AREA_PER_PARTICLE * 1.5,
                min_count: 20,
                max_count: STREAK_COMPACT_MAX,
            },
            regular: Density {
                area_per_particle: STREAK_AREA_PER_PARTICLE,
                min_count: 40,
                max_count: STREAK_REGULAR_MAX,
            },
            spawn: SpawnConfig {
                speed: Span::new(0.05, 0.25),
                size: Span::new(0.8, 2.0),
                opacity: Span::new(0.2, 0.5),
                max_opacity: 0.9,
                heading: Some(-std::f32::consts::FRAC_PI_2),
                palette: PALE_PALETTE,
            },
            pointer: None,
            connections: None,
            streaks: Some(StreakConfig {
                threshold: STREAK_THRESHOLD,
                norm_factor: STREAK_NORM_FACTOR,
                max_length: STREAK_MAX_LENGTH,
                width: 1.0,
                opacity: 0.6,
            }),
            trail: None,
            scroll_smoothing: Smoothing {
                alpha: STREAK_ALPHA,
                ..Smoothing::default()
            },
            pointer_smoothing: Smoothing::default(),
            visual_lerp: STREAK_VISUAL_LERP,
            twinkle: 0.15,
            wrap_margin: WRAP_MARGIN,
            idle_timeout_sec: POINTER_IDLE_TIMEOUT_SEC,
            body: BodyStyle {
                glow_scale: 2.0,
                glow_alpha: 0.15,
                highlight: true,
            },
            reduced_motion: ReducedMotionPolicy::Calm,
            requires_fine_pointer: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn density(&self, class: DeviceClass) -> &Density {
        match class {
            DeviceClass::Compact => &self.compact,
            DeviceClass::Regular => &self.regular,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compact.validate("compact")?;
        self.regular.validate("regular")?;

        let spawn = &self.spawn;
        spawn.speed.validate("speed")?;
        spawn.size.validate("size")?;
        spawn.opacity.validate("opacity")?;
        within("speed.min", spawn.speed.min, 0.0, f32::MAX)?;
        positive("size.min", spawn.size.min)?;
        unit_interval("opacity.max", spawn.opacity.max)?;
        within("max_opacity", spawn.max_opacity, spawn.opacity.max, 1.0)?;
        if spawn.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        if let Some(p) = &self.pointer {
            positive("influence_radius", p.influence_radius)?;
            positive("max_speed", p.max_speed)?;
            unit_interval("relax_rate", p.relax_rate)?;
            if !p.strength.is_finite() {
                return Err(ConfigError::OutOfRange {
                    name: "strength",
                    value: p.strength,
                    min: f32::MIN,
                    max: f32::MAX,
                });
            }
        }
        if let Some(c) = &self.connections {
            positive("connection distance", c.distance)?;
            unit_interval("line opacity", c.max_opacity)?;
        }
        if let Some(s) = &self.streaks {
            positive("norm_factor", s.norm_factor)?;
            positive("max_length", s.max_length)?;
            within("streak threshold", s.threshold, 0.0, f32::MAX)?;
        }
        if let Some(t) = &self.trail {
            if t.capacity < 2 {
                return Err(ConfigError::TrailCapacity(t.capacity));
            }
            unit_interval("follow_rate", t.follow_rate)?;
            positive("speed_norm", t.speed_norm)?;
        }

        self.scroll_smoothing.validate()?;
        self.pointer_smoothing.validate()?;
        unit_interval("visual_lerp", self.visual_lerp)?;
        unit_interval("twinkle", self.twinkle)?;
        within("wrap_margin", self.wrap_margin, 0.0, f32::MAX)?;
        positive("idle_timeout", self.idle_timeout_sec as f32)?;
        Ok(())
    }
}
