// Shared tuning constants. Per-effect values are grouped by effect prefix so
// each effect can be tuned independently.

// Frame timing
pub const NOMINAL_FRAME_SEC: f32 = 1.0 / 60.0;
pub const MAX_FRAME_GAP: f32 = 3.0; // dt clamp, in nominal frames
pub const FPS_WINDOW_SEC: f64 = 0.5;

// Surface
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 2.0;
pub const COMPACT_BREAKPOINT_PX: f32 = 768.0; // logical width below which a surface is Compact
pub const DRASTIC_AREA_RATIO: f32 = 2.0; // area change that forces a full reseed

// Geometry guards
pub const DISTANCE_EPSILON: f32 = 1e-3;
pub const WRAP_MARGIN: f32 = 20.0;

// Signals
pub const POINTER_IDLE_TIMEOUT_SEC: f64 = 1.5;
pub const ACTIVITY_FADE_RATE: f32 = 0.08;

// Default smoothing (EMA) shared by the scroll estimators
pub const VELOCITY_ALPHA: f32 = 0.12;
pub const VELOCITY_DECAY: f32 = 0.92;
pub const VELOCITY_EPSILON: f32 = 0.05;
pub const VELOCITY_RAW_THRESHOLD: f32 = 0.1;
pub const VELOCITY_MIN_DT: f32 = 0.25; // nominal frames

pub const DEFAULT_SEED: u64 = 42;
pub const TWINKLE_RATE: f32 = 0.9; // radians per second

// Constellation: drifting nodes joined by proximity lines
pub const CONSTELLATION_AREA_PER_PARTICLE: f32 = 9_000.0;
pub const CONSTELLATION_COMPACT_MAX: usize = 40;
pub const CONSTELLATION_REGULAR_MAX: usize = 110;
pub const CONSTELLATION_SPEED: [f32; 2] = [0.08, 0.35]; // px per nominal frame
pub const CONSTELLATION_SIZE: [f32; 2] = [1.0, 2.6];
pub const CONSTELLATION_OPACITY: [f32; 2] = [0.25, 0.6];
pub const CONSTELLATION_MAX_OPACITY: f32 = 0.95;
pub const CONSTELLATION_INFLUENCE_RADIUS: f32 = 160.0;
pub const CONSTELLATION_ATTRACTION: f32 = 0.05;
pub const CONSTELLATION_MAX_SPEED: f32 = 1.6;
pub const CONSTELLATION_CONNECT_DISTANCE: f32 = 120.0;
pub const CONSTELLATION_LINE_OPACITY: f32 = 0.22;
pub const CONSTELLATION_VISUAL_LERP: f32 = 0.08;
pub const CONSTELLATION_ALPHA: f32 = 0.15;

// Cursor trail: a ring of recent head positions chasing the pointer
pub const TRAIL_CAPACITY: usize = 25;
pub const TRAIL_FOLLOW_RATE: f32 = 0.35;
pub const TRAIL_HEAD_SIZE: f32 = 7.0;
pub const TRAIL_TAIL_SIZE: f32 = 0.8;
pub const TRAIL_SPEED_NORM: f32 = 30.0; // px per frame for full head swell
pub const TRAIL_DUST_AREA_PER_PARTICLE: f32 = 30_000.0;
pub const TRAIL_DUST_MAX: usize = 30;
pub const TRAIL_VISUAL_LERP: f32 = 0.12;
pub const TRAIL_ALPHA: f32 = 0.12;

// Scroll streaks: dust elongated by scroll velocity
pub const STREAK_AREA_PER_PARTICLE: f32 = 6_000.0;
pub const STREAK_COMPACT_MAX: usize = 60;
pub const STREAK_REGULAR_MAX: usize = 160;
pub const STREAK_THRESHOLD: f32 = 0.5; // px per frame
pub const STREAK_NORM_FACTOR: f32 = 40.0;
pub const STREAK_MAX_LENGTH: f32 = 80.0;
pub const STREAK_VISUAL_LERP: f32 = 0.04;
pub const STREAK_ALPHA: f32 = 0.12;
