// DOM wiring for ambient surfaces

// Mount points opt in with <canvas data-ambient="constellation">
pub const MOUNT_SELECTOR: &str = "canvas[data-ambient]";
pub const EFFECT_ATTR: &str = "data-ambient";
pub const SEED_ATTR: &str = "data-seed"; // decimal, 0x-hex, or "random"
pub const STATE_ATTR: &str = "data-ambient-state"; // resolved mode, for CSS hooks

// Media queries (evaluated once per mount)
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const FINE_POINTER_QUERY: &str = "(pointer: fine)";

// Frames between debug timing lines
pub const FRAME_LOG_INTERVAL: u64 = 600;
