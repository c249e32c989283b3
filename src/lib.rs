//! Shape Sprint - an auto-scrolling rhythm runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, tile collisions, checkpoints)
//! - `records`: Per-level best progress, persisted as JSON
//! - `tuning`: Data-driven physics constants

pub mod records;
pub mod sim;
pub mod tuning;

pub use records::{LevelRecord, PersistError, PlayMode, Records};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (240 Hz)
    pub const SIM_DT: f64 = 1.0 / 240.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the loop will feed into the accumulator
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Constant scroll speed in blocks per second
    pub const X_SPEED: f64 = 10.386;
    /// Visible level height in blocks (the ceiling sits one block below it)
    pub const LEVEL_HEIGHT: f64 = 11.0;

    /// Player footprint: a unit-diameter circle
    pub const PLAYER_WIDTH: f64 = 1.0;
    pub const PLAYER_RADIUS: f64 = PLAYER_WIDTH * 0.5;

    /// Circle roll rate in radians/s (rolling without slipping)
    pub const ROLL_RATE: f64 = X_SPEED / PLAYER_RADIUS;

    /// Gravity multiplier on x_speed²
    pub const GRAVITY_FACTOR: f64 = 0.876;
    /// Terminal fall speed multiplier on x_speed
    pub const MIN_Y_SPEED_FACTOR: f64 = -2.6;
    /// Jump impulse multiplier on x_speed
    pub const JUMP_Y_SPEED_FACTOR: f64 = 2.0;
    /// Yellow pad impulse multiplier on x_speed
    pub const PAD_Y_SPEED_FACTOR: f64 = 2.77;
    /// Triangle flight bounds, multipliers on x_speed
    pub const TRIANGLE_MAX_FACTOR: f64 = 1.4;
    pub const TRIANGLE_MIN_FACTOR: f64 = -1.0;
    /// Triangle flight acceleration multiplier on x_speed²
    pub const TRIANGLE_ACCEL_FACTOR: f64 = 0.4;

    /// Ceiling used in Circle×RightSideUp, where only solid tiles can stop an ascent
    pub const OPEN_CEILING: f64 = 1_000_000.0;

    /// Seconds between death and the next attempt
    pub const DEATH_DELAY: f64 = 1.0;
    /// Length of the level-complete fly-out
    pub const WIN_ANIMATION_LENGTH: f64 = 1.0;
    /// Extra pause after the fly-out before the win screen is requested
    pub const WIN_SCREEN_DELAY: f64 = 0.7;

    /// Start pose x for the first attempt of a level
    pub const LEVEL_START_X: f64 = -15.0;
    /// Start pose x for every later normal-mode attempt
    pub const RETRY_START_X: f64 = -10.0;

    /// Minimum distance between practice checkpoints
    pub const CHECKPOINT_SPACING: f64 = 15.0;
    /// Deaths closer than this to a checkpoint count against it
    pub const CHECKPOINT_DEATH_RADIUS: f64 = 7.0;
    /// Deaths near a checkpoint before it is rolled back
    pub const CHECKPOINT_DEATH_LIMIT: u32 = 3;

    /// Ground strip (screen fraction) defaults
    pub const GROUND_STRIP_BASE: f64 = 0.3;
    pub const GROUND_STRIP_THRESHOLD: f64 = 0.45;
    pub const GROUND_STRIP_MOVE_SPEED: f64 = 0.04;
    pub const GROUND_STRIP_TOLERANCE: f64 = 0.1;
}

/// Wrap an angle into (-2π, 2π), keeping its sign like `fmod`
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    angle % std::f64::consts::TAU
}

/// Move `current` toward `target` by at most `max_step`, never overshooting
#[inline]
pub fn approach(current: f64, target: f64, max_step: f64) -> f64 {
    if current < target {
        (current + max_step).min(target)
    } else {
        (current - max_step).max(target)
    }
}
