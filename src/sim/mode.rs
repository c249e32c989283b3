//! Shape/orientation switching and the per-regime motion rules
//!
//! Each of the four regimes (Circle or Triangle, right side up or upside
//! down) owns its gravity, flight, velocity bounds and impulse signs.
//! Inverted gravity pulls the circle upward, but its speed is floored at the
//! same downward cap in both orientations; the triangle bounds mirror.

use super::grid::TileSource;
use super::state::{Orientation, PlayerState, Regime, ShapeMode};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::wrap_angle;

impl Regime {
    #[inline]
    fn sign(self) -> f64 {
        self.orientation().sign()
    }

    /// Circle roll for this tick. Triangle heading is set after integration.
    pub fn roll(self, rotation: f64, dt: f64, tuning: &Tuning) -> f64 {
        match self.shape() {
            ShapeMode::Circle => wrap_angle(rotation + self.sign() * tuning.roll_rate * dt),
            ShapeMode::Triangle => rotation,
        }
    }

    /// Whether gravity/flight integration applies. Right-side-up regimes rest
    /// on the ground, upside-down regimes on the ceiling (`ceiling_rest` is
    /// the height the player's bottom has when touching it).
    pub fn is_airborne(self, y: f64, velocity_y: f64, ground: f64, ceiling_rest: f64) -> bool {
        if velocity_y != 0.0 {
            return true;
        }
        match self.orientation() {
            Orientation::RightSideUp => y > ground,
            Orientation::UpsideDown => y < ceiling_rest,
        }
    }

    /// Airborne velocity update before the position step: gravity for the
    /// circle, passive sinking for a triangle that is not flying.
    pub fn integrate_airborne(self, velocity_y: f64, jump_held: bool, dt: f64, tuning: &Tuning) -> f64 {
        match self {
            Regime::CircleUp => (velocity_y - tuning.gravity * dt).max(tuning.min_y_speed),
            Regime::CircleDown => (velocity_y + tuning.gravity * dt).max(tuning.min_y_speed),
            Regime::TriangleUp if !jump_held => {
                (velocity_y - tuning.triangle_y_accel * dt).max(tuning.triangle_min_y_speed)
            }
            Regime::TriangleDown if !jump_held => {
                (velocity_y + tuning.triangle_y_accel * dt).min(-tuning.triangle_min_y_speed)
            }
            Regime::TriangleUp | Regime::TriangleDown => velocity_y,
        }
    }

    /// Triangle thrust while jump is held
    pub fn apply_flight(self, velocity_y: f64, dt: f64, tuning: &Tuning) -> f64 {
        match self {
            Regime::TriangleUp => (velocity_y + tuning.triangle_y_accel * dt).min(tuning.triangle_max_y_speed),
            Regime::TriangleDown => (velocity_y - tuning.triangle_y_accel * dt).max(-tuning.triangle_max_y_speed),
            Regime::CircleUp | Regime::CircleDown => velocity_y,
        }
    }

    /// Legal vertical speed range
    pub fn velocity_bounds(self, tuning: &Tuning) -> (f64, f64) {
        match self {
            Regime::CircleUp | Regime::CircleDown => (tuning.min_y_speed, f64::INFINITY),
            Regime::TriangleUp => (tuning.triangle_min_y_speed, tuning.triangle_max_y_speed),
            Regime::TriangleDown => (-tuning.triangle_max_y_speed, -tuning.triangle_min_y_speed),
        }
    }

    #[inline]
    pub fn clamp_velocity(self, velocity_y: f64, tuning: &Tuning) -> f64 {
        let (lo, hi) = self.velocity_bounds(tuning);
        velocity_y.clamp(lo, hi)
    }

    /// Ground or ring jump impulse
    pub fn jump_velocity(self, tuning: &Tuning) -> f64 {
        tuning.jump_y_speed * self.sign()
    }

    /// Yellow pad impulse
    pub fn pad_velocity(self, tuning: &Tuning) -> f64 {
        tuning.pad_y_speed * self.sign()
    }

    /// Triangle heading: ease back to level while resting, otherwise point
    /// along the velocity.
    pub fn triangle_heading(
        self,
        rotation: f64,
        velocity_y: f64,
        resting: Resting,
        dt: f64,
        tuning: &Tuning,
    ) -> f64 {
        let ease = tuning.roll_rate * 0.5 * dt;
        match resting {
            Resting::Ground => (rotation - ease).max(0.0),
            Resting::Ceiling => (rotation + ease).min(0.0),
            Resting::Airborne => (-velocity_y).atan2(tuning.x_speed),
        }
    }

    /// Where the drawn ground strip wants to be (fraction of screen height)
    pub fn ground_strip_target(self, last_ground_y: f64, y: f64, level_height: f64) -> f64 {
        match self {
            Regime::CircleUp => {
                GROUND_STRIP_BASE.min(GROUND_STRIP_THRESHOLD - last_ground_y.min(y) / level_height)
            }
            _ => 0.5 / level_height,
        }
    }

    /// Slack before the ground strip starts moving
    pub fn ground_strip_tolerance(self) -> f64 {
        match self {
            Regime::CircleUp => GROUND_STRIP_TOLERANCE,
            _ => 0.0,
        }
    }
}

/// Which surface, if any, the player is resting on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resting {
    Ground,
    Ceiling,
    Airborne,
}

/// Mode flips caused by portal contact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeChange {
    pub shape: Option<ShapeMode>,
    pub orientation: Option<Orientation>,
}

/// Check the two cells the player occupies in its column for portals and
/// flip shape and orientation independently. Entering Triangle levels the
/// player out; leaving it keeps the current rotation.
pub fn update_mode<G: TileSource + ?Sized>(player: &mut PlayerState, grid: &G) -> ModeChange {
    let col = player.x.floor() as i64;
    let bottom = player.y.floor() as i64;
    let cells = [bottom, bottom + 1];
    let touching = |pred: fn(&G, i64, i64) -> bool| cells.iter().any(|&row| pred(grid, col, row));

    let mut change = ModeChange::default();

    match player.shape {
        ShapeMode::Triangle if touching(G::is_circle_portal) => {
            player.shape = ShapeMode::Circle;
            change.shape = Some(ShapeMode::Circle);
        }
        ShapeMode::Circle if touching(G::is_triangle_portal) => {
            player.shape = ShapeMode::Triangle;
            player.rotation = 0.0;
            change.shape = Some(ShapeMode::Triangle);
        }
        _ => {}
    }

    match player.orientation {
        Orientation::UpsideDown if touching(G::is_right_side_up_portal) => {
            player.orientation = Orientation::RightSideUp;
            change.orientation = Some(Orientation::RightSideUp);
        }
        Orientation::RightSideUp if touching(G::is_upside_down_portal) => {
            player.orientation = Orientation::UpsideDown;
            change.orientation = Some(Orientation::UpsideDown);
        }
        _ => {}
    }

    change
}
