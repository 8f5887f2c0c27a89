use glam::Vec2;
use motion_core::MotionMode;

// Pure helpers shared by the event handlers and mount. No web_sys types here
// so the host test suite can include this file directly.

/// Viewport (client) coordinates to canvas-local CSS pixels.
#[inline]
pub fn client_to_local(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Vec2 {
    Vec2::new((client_x - rect_left) as f32, (client_y - rect_top) as f32)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Fixed(u64),
    Random,
}

/// Parse a `data-seed` value. Unparseable input falls back to the preset.
pub fn parse_seed(raw: &str) -> Option<SeedChoice> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("random") {
        return Some(SeedChoice::Random);
    }
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse::<u64>().ok(),
    };
    parsed.map(SeedChoice::Fixed)
}

/// Map a uniform sample in [0, 1) onto the full seed range.
#[inline]
pub fn seed_from_unit(sample: f64) -> u64 {
    if !sample.is_finite() {
        return 0;
    }
    (sample.clamp(0.0, 1.0) * u64::MAX as f64) as u64
}

/// `scrollY` can be fractional or, on some engines, briefly negative
/// during overscroll bounce.
#[inline]
pub fn scroll_offset(scroll_y: f64) -> f32 {
    if scroll_y.is_finite() {
        scroll_y.max(0.0) as f32
    } else {
        0.0
    }
}

/// Value for the canvas state attribute. Disabled surfaces never mount, so
/// they get none and the attribute never outlives an instance.
#[inline]
pub fn state_attr(mode: MotionMode) -> Option<&'static str> {
    match mode {
        MotionMode::Disabled => None,
        MotionMode::Static => Some("static"),
        MotionMode::Calm => Some("calm"),
        MotionMode::Full => Some("full"),
    }
}

// ---------------- Color helpers ----------------
#[inline]
fn channel(v: f32) -> u8 {
    if v.is_finite() {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        0
    }
}

pub fn css_rgb(color: [f32; 3]) -> String {
    format!(
        "rgb({}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2])
    )
}

pub fn css_rgba(color: [f32; 3], alpha: f32) -> String {
    let a = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
    format!(
        "rgba({}, {}, {}, {:.3})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        a
    )
}
