//! Backing-buffer sizing at device pixel ratio and resize reconciliation.

use crate::config::{Density, EffectConfig};
use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Compact,
    Regular,
}

impl DeviceClass {
    pub fn for_width(logical_width: f32) -> Self {
        if logical_width < COMPACT_BREAKPOINT_PX {
            DeviceClass::Compact
        } else {
            DeviceClass::Regular
        }
    }
}

/// Logical size plus the ratio used for the backing buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Surface {
    /// Returns `None` for a container with no measurable size.
    pub fn new(width: f32, height: f32, dpr: f32) -> Option<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 1.0 || height < 1.0 {
            return None;
        }
        Some(Self {
            width,
            height,
            dpr: sanitize_dpr(dpr),
        })
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Physical pixel dimensions of the backing buffer.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width * self.dpr).round() as u32;
        let h = (self.height * self.dpr).round() as u32;
        (w.max(1), h.max(1))
    }

    /// 2D affine transform `[a, b, c, d, e, f]` that lets callers draw in
    /// logical units on the backing buffer.
    pub fn transform(&self) -> [f64; 6] {
        let s = self.dpr as f64;
        [s, 0.0, 0.0, s, 0.0, 0.0]
    }

    #[inline]
    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::for_width(self.width)
    }
}

/// Clamp the host ratio to a sane range; non-finite values fall back to 1.
pub fn sanitize_dpr(dpr: f32) -> f32 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.min(MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Outcome of a size notification, telling the engine how to treat the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceChange {
    /// Container still has no size; nothing was allocated.
    Deferred,
    /// First successful measurement.
    Initialized { surface: Surface, count: usize },
    /// Mild resize: keep particles, grow or truncate to `count`.
    Reconciled { surface: Surface, count: usize },
    /// Device class flipped or area changed drastically: reseed everything.
    Regenerated { surface: Surface, count: usize },
    Unchanged,
}

impl SurfaceChange {
    pub fn surface(&self) -> Option<Surface> {
        match *self {
            SurfaceChange::Initialized { surface, .. }
            | SurfaceChange::Reconciled { surface, .. }
            | SurfaceChange::Regenerated { surface, .. } => Some(surface),
            SurfaceChange::Deferred | SurfaceChange::Unchanged => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SurfaceManager {
    surface: Option<Surface>,
    compact: Density,
    regular: Density,
    drastic_ratio: f32,
}

impl SurfaceManager {
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            surface: None,
            compact: config.compact,
            regular: config.regular,
            drastic_ratio: DRASTIC_AREA_RATIO,
        }
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    pub fn particle_count(&self, surface: &Surface) -> usize {
        let density = match surface.device_class() {
            DeviceClass::Compact => &self.compact,
            DeviceClass::Regular => &self.regular,
        };
        density.count_for_area(surface.area())
    }

    /// First measurement. A zero-size container defers until a later resize.
    pub fn init(&mut self, size: Vec2, dpr: f32) -> SurfaceChange {
        match Surface::new(size.x, size.y, dpr) {
            Some(surface) => {
                self.surface = Some(surface);
                SurfaceChange::Initialized {
                    surface,
                    count: self.particle_count(&surface),
                }
            }
            None => SurfaceChange::Deferred,
        }
    }

    pub fn on_resize(&mut self, size: Vec2, dpr: f32) -> SurfaceChange {
        let Some(previous) = self.surface else {
            return self.init(size, dpr);
        };
        let Some(next) = Surface::new(size.x, size.y, dpr) else {
            // Collapsed container (e.g. display:none); keep the last good size.
            return SurfaceChange::Unchanged;
        };
        if next == previous {
            return SurfaceChange::Unchanged;
        }
        self.surface = Some(next);
        let count = self.particle_count(&next);
        if self.is_drastic(&previous, &next) {
            SurfaceChange::Regenerated {
                surface: next,
                count,
            }
        } else {
            SurfaceChange::Reconciled {
                surface: next,
                count,
            }
        }
    }

    fn is_drastic(&self, previous: &Surface, next: &Surface) -> bool {
        if previous.device_class() != next.device_class() {
            return true;
        }
        let (a, b) = (previous.area(), next.area());
        a.max(b) / a.min(b).max(1.0) > self.drastic_ratio
    }
}
