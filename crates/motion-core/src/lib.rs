//! Ambient motion engine: particle fields, pointer trails and scroll streaks
//! for canvas surfaces.
//!
//! Nothing here touches a platform API. Hosts feed pointer, scroll, resize and
//! frame timestamps in, and receive paint calls out through [`Painter`].

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod force;
pub mod frame;
pub mod lifecycle;
pub mod particle;
pub mod render;
pub mod signal;
pub mod surface;
pub mod trail;
pub mod velocity;

pub use config::*;
pub use engine::MotionEngine;
pub use error::ConfigError;
pub use force::{falloff, wrap_position, ForceInput, ForceModel};
pub use frame::{FrameClock, FrameStep};
pub use lifecycle::{Capabilities, LifecycleGate, MotionMode, TeardownStep};
pub use particle::{Particle, ParticleField};
pub use render::{connection_pairs, Connection, Frame, Painter, Renderer};
pub use signal::{Drained, SignalSampler};
pub use surface::{DeviceClass, Surface, SurfaceChange, SurfaceManager};
pub use trail::{age_fraction, CursorTrail, SlotStyle, TrailBuffer, TrailStyle};
pub use velocity::{SignalValue, Smoothing, VelocityEstimator};
