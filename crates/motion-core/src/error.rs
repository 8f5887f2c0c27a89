//! Construction-time validation errors.
//!
//! The running engine never fails; a bad configuration is rejected once, when
//! an effect is built, and the host mounts nothing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{0} span is inverted (min > max)")]
    InvertedSpan(&'static str),
    #[error("{class} density bounds inverted: min {min} > max {max}")]
    DensityBounds {
        class: &'static str,
        min: usize,
        max: usize,
    },
    #[error("trail capacity must be at least 2, got {0}")]
    TrailCapacity(usize),
    #[error("palette is empty")]
    EmptyPalette,
}

pub(crate) fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

pub(crate) fn unit_interval(name: &'static str, value: f32) -> Result<(), ConfigError> {
    within(name, value, 0.0, 1.0)
}

pub(crate) fn within(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
