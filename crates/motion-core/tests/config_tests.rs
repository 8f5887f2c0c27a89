// Host-side tests for effect presets, validation and tuning constants.

use motion_core::constants::*;
use motion_core::{ConfigError, DeviceClass, EffectConfig, EffectKind, Smoothing};

#[test]
fn every_preset_validates() {
    for kind in EffectKind::ALL {
        let cfg = EffectConfig::for_kind(kind);
        assert_eq!(cfg.kind, kind);
        assert_eq!(cfg.validate(), Ok(()), "{}", kind.name());
    }
}

#[test]
fn kind_names_round_trip_and_aliases_parse() {
    for kind in EffectKind::ALL {
        assert_eq!(EffectKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(EffectKind::from_name(" Trail "), Some(EffectKind::CursorTrail));
    assert_eq!(EffectKind::from_name("STREAKS"), Some(EffectKind::ScrollStreaks));
    assert_eq!(EffectKind::from_name("fireworks"), None);
}

#[test]
fn presets_carry_only_their_own_features() {
    let c = EffectConfig::constellation();
    assert!(c.connections.is_some() && c.streaks.is_none() && c.trail.is_none());
    let t = EffectConfig::cursor_trail();
    assert!(t.trail.is_some() && t.requires_fine_pointer);
    let s = EffectConfig::scroll_streaks();
    assert!(s.streaks.is_some() && s.pointer.is_none());
}

#[test]
fn density_bounds_are_enforced() {
    let mut cfg = EffectConfig::constellation();
    cfg.compact.min_count = 50;
    cfg.compact.max_count = 10;
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::DensityBounds {
            class: "compact",
            min: 50,
            max: 10
        })
    );
}

#[test]
fn invalid_spawn_ranges_are_rejected() {
    let mut cfg = EffectConfig::constellation();
    cfg.spawn.speed.min = 1.0;
    cfg.spawn.speed.max = 0.5;
    assert_eq!(cfg.validate(), Err(ConfigError::InvertedSpan("speed")));

    let mut cfg = EffectConfig::constellation();
    cfg.spawn.size.min = 0.0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NonPositive { name: "size.min", .. })
    ));

    let mut cfg = EffectConfig::constellation();
    cfg.spawn.max_opacity = 1.5;
    assert!(matches!(cfg.validate(), Err(ConfigError::OutOfRange { .. })));
}

#[test]
fn trail_capacity_must_hold_a_tail() {
    let mut cfg = EffectConfig::cursor_trail();
    if let Some(t) = &mut cfg.trail {
        t.capacity = 1;
    }
    assert_eq!(cfg.validate(), Err(ConfigError::TrailCapacity(1)));
}

#[test]
fn smoothing_outside_unit_interval_is_rejected() {
    let mut cfg = EffectConfig::scroll_streaks();
    cfg.scroll_smoothing.alpha = 1.2;
    assert!(cfg.validate().is_err());
    cfg.scroll_smoothing = Smoothing::default();
    cfg.idle_timeout_sec = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn density_counts_are_clamped() {
    let cfg = EffectConfig::constellation();
    let regular = cfg.density(DeviceClass::Regular);
    assert_eq!(regular.count_for_area(0.0), regular.min_count);
    assert_eq!(regular.count_for_area(1.0e12), regular.max_count);
    assert_eq!(
        regular.count_for_area(40.0 * CONSTELLATION_AREA_PER_PARTICLE),
        40
    );
}

#[test]
fn errors_render_readable_messages() {
    let err = ConfigError::TrailCapacity(0);
    assert_eq!(err.to_string(), "trail capacity must be at least 2, got 0");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Smoothing factors are fractions
    assert!(VELOCITY_ALPHA > 0.0 && VELOCITY_ALPHA < 1.0);
    assert!(VELOCITY_DECAY > 0.0 && VELOCITY_DECAY < 1.0);
    assert!(VELOCITY_EPSILON < VELOCITY_RAW_THRESHOLD);

    // Visual interpolation rates are fractions
    assert!(CONSTELLATION_VISUAL_LERP > 0.0 && CONSTELLATION_VISUAL_LERP < 1.0);
    assert!(TRAIL_VISUAL_LERP > 0.0 && TRAIL_VISUAL_LERP < 1.0);
    assert!(STREAK_VISUAL_LERP > 0.0 && STREAK_VISUAL_LERP < 1.0);
    assert!(TRAIL_FOLLOW_RATE > 0.0 && TRAIL_FOLLOW_RATE <= 1.0);

    // Caps keep a backgrounded tab from teleporting particles
    assert!(MAX_FRAME_GAP >= 1.0);
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(CONSTELLATION_COMPACT_MAX <= CONSTELLATION_REGULAR_MAX);
    assert!(STREAK_COMPACT_MAX <= STREAK_REGULAR_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn span_pairs_are_ordered() {
    assert!(CONSTELLATION_SPEED[0] <= CONSTELLATION_SPEED[1]);
    assert!(CONSTELLATION_SIZE[0] <= CONSTELLATION_SIZE[1]);
    assert!(CONSTELLATION_OPACITY[0] <= CONSTELLATION_OPACITY[1]);
    assert!(CONSTELLATION_OPACITY[1] <= CONSTELLATION_MAX_OPACITY);
    assert!(TRAIL_TAIL_SIZE < TRAIL_HEAD_SIZE);
}
