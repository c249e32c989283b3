//! Practice-mode checkpoints
//!
//! Two snapshots are kept: the current checkpoint and the one before it.
//! A checkpoint that keeps killing the player shortly after respawn is
//! assumed to sit in front of an unbeatable obstacle and is rolled back.

use serde::{Deserialize, Serialize};

use super::state::{Orientation, PlayerState, ShapeMode};

/// Saved player pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub x: f64,
    pub y: f64,
    pub velocity_y: f64,
    pub shape: ShapeMode,
    pub orientation: Orientation,
}

impl Checkpoint {
    pub fn from_player(player: &PlayerState) -> Self {
        Self {
            x: player.x,
            y: player.y,
            velocity_y: player.velocity_y,
            shape: player.shape,
            orientation: player.orientation,
        }
    }

    /// Put the player back at this checkpoint
    pub fn restore_into(&self, player: &mut PlayerState) {
        player.x = self.x;
        player.y = self.y;
        player.velocity_y = self.velocity_y;
        player.shape = self.shape;
        player.orientation = self.orientation;
    }
}

/// Result of rolling back a checkpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rollback {
    pub deleted_x: f64,
    pub restored_x: f64,
}

/// Current + previous checkpoint with the near-death counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointManager {
    current: Checkpoint,
    previous: Checkpoint,
    /// Deaths close to the current checkpoint since it was created
    death_count: u32,
}

impl CheckpointManager {
    pub fn new(start: Checkpoint) -> Self {
        Self {
            current: start,
            previous: start,
            death_count: 0,
        }
    }

    pub fn current(&self) -> &Checkpoint {
        &self.current
    }

    pub fn previous(&self) -> &Checkpoint {
        &self.previous
    }

    pub fn death_count(&self) -> u32 {
        self.death_count
    }

    /// Whether a practice run at this state has earned a new checkpoint
    pub fn is_due(&self, player: &PlayerState, just_landed: bool, spacing: f64) -> bool {
        player.life.is_alive()
            && (just_landed || player.shape == ShapeMode::Triangle)
            && player.x - self.current.x > spacing
    }

    /// Snapshot the player; the old current checkpoint becomes the previous one
    pub fn create(&mut self, player: &PlayerState) {
        self.previous = self.current;
        self.current = Checkpoint::from_player(player);
        self.death_count = 0;
    }

    /// Count a death at `x`. Returns the rollback when the current checkpoint
    /// has reached the death limit and a distinct previous one exists.
    pub fn on_death(&mut self, x: f64, radius: f64, limit: u32) -> Option<Rollback> {
        if x - self.current.x < radius {
            self.death_count += 1;
        }

        if self.death_count >= limit && self.previous != self.current {
            let deleted_x = self.current.x;
            self.current = self.previous;
            self.death_count = 0;
            return Some(Rollback {
                deleted_x,
                restored_x: self.current.x,
            });
        }
        None
    }

    /// Clear both checkpoints to a single pose
    pub fn reset_to(&mut self, start: Checkpoint) {
        self.current = start;
        self.previous = start;
        self.death_count = 0;
    }
}
