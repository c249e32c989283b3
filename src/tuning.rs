//! Data-driven physics tuning
//!
//! Every speed in the game is derived from the scroll speed, so retuning
//! `x_speed` keeps jump arcs the same shape in block units. Loaded from JSON;
//! missing fields fall back to the shipped values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::records::PersistError;

/// Physics constants for one play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal scroll speed (blocks/s)
    pub x_speed: f64,
    /// Circle gravity (blocks/s²)
    pub gravity: f64,
    /// Circle terminal fall speed (negative, blocks/s)
    pub min_y_speed: f64,
    /// Ground/ring jump impulse
    pub jump_y_speed: f64,
    /// Yellow pad impulse
    pub pad_y_speed: f64,
    /// Triangle flight bounds
    pub triangle_max_y_speed: f64,
    pub triangle_min_y_speed: f64,
    /// Triangle flight acceleration (blocks/s²), both rising and sinking
    pub triangle_y_accel: f64,
    /// Circle roll rate (rad/s)
    pub roll_rate: f64,

    /// Level height in blocks
    pub level_height: f64,

    // === Timers ===
    pub death_delay: f64,
    pub win_animation_length: f64,
    pub win_screen_delay: f64,

    // === Practice checkpoints ===
    pub checkpoint_spacing: f64,
    pub checkpoint_death_radius: f64,
    pub checkpoint_death_limit: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_speed(X_SPEED)
    }
}

impl Tuning {
    /// Derive every speed from a scroll speed using the shipped factors
    pub fn for_speed(x_speed: f64) -> Self {
        Self {
            x_speed,
            gravity: GRAVITY_FACTOR * x_speed * x_speed,
            min_y_speed: MIN_Y_SPEED_FACTOR * x_speed,
            jump_y_speed: JUMP_Y_SPEED_FACTOR * x_speed,
            pad_y_speed: PAD_Y_SPEED_FACTOR * x_speed,
            triangle_max_y_speed: TRIANGLE_MAX_FACTOR * x_speed,
            triangle_min_y_speed: TRIANGLE_MIN_FACTOR * x_speed,
            triangle_y_accel: TRIANGLE_ACCEL_FACTOR * x_speed * x_speed,
            roll_rate: x_speed / PLAYER_RADIUS,

            level_height: LEVEL_HEIGHT,

            death_delay: DEATH_DELAY,
            win_animation_length: WIN_ANIMATION_LENGTH,
            win_screen_delay: WIN_SCREEN_DELAY,

            checkpoint_spacing: CHECKPOINT_SPACING,
            checkpoint_death_radius: CHECKPOINT_DEATH_RADIUS,
            checkpoint_death_limit: CHECKPOINT_DEATH_LIMIT,
        }
    }

    /// Parse tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read tuning, falling back to defaults if the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}
