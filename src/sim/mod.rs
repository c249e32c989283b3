//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Read-only tile grid for the whole session
//! - No rendering, audio or platform dependencies

pub mod checkpoint;
pub mod collision;
pub mod geometry;
pub mod grid;
pub mod mode;
pub mod progress;
pub mod state;
pub mod tick;
pub mod tile;

pub use checkpoint::{Checkpoint, CheckpointManager, Rollback};
pub use collision::{any_pad_intersects, ceiling_y, ground_y, hazard_intersects, pad_intersects, ring_intersects};
pub use grid::{TileGrid, TileSource};
pub use mode::{ModeChange, Resting, update_mode};
pub use progress::progress_fraction;
pub use state::{
    GameEvent, GameState, LifeState, Orientation, PlayerState, Pose, Regime, ShapeMode, TickReport,
};
pub use tick::{TickInput, tick};
pub use tile::{PortalHalf, PortalKind, TileKind};
