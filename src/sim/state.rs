//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`; renderers, audio
//! and persistence only ever see copies handed out after a tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::checkpoint::{Checkpoint, CheckpointManager};
use super::progress::progress_fraction;
use crate::consts::*;
use crate::tuning::Tuning;

/// Gravity/flight regime shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeMode {
    /// Rolls along the ground and jumps
    #[default]
    Circle,
    /// Flies while jump is held
    Triangle,
}

/// Gravity direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    RightSideUp,
    UpsideDown,
}

impl Orientation {
    /// +1 for normal gravity, -1 when inverted
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Orientation::RightSideUp => 1.0,
            Orientation::UpsideDown => -1.0,
        }
    }
}

/// The four legal shape × orientation combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    CircleUp,
    CircleDown,
    TriangleUp,
    TriangleDown,
}

impl Regime {
    pub fn of(shape: ShapeMode, orientation: Orientation) -> Self {
        match (shape, orientation) {
            (ShapeMode::Circle, Orientation::RightSideUp) => Regime::CircleUp,
            (ShapeMode::Circle, Orientation::UpsideDown) => Regime::CircleDown,
            (ShapeMode::Triangle, Orientation::RightSideUp) => Regime::TriangleUp,
            (ShapeMode::Triangle, Orientation::UpsideDown) => Regime::TriangleDown,
        }
    }

    pub fn shape(self) -> ShapeMode {
        match self {
            Regime::CircleUp | Regime::CircleDown => ShapeMode::Circle,
            Regime::TriangleUp | Regime::TriangleDown => ShapeMode::Triangle,
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            Regime::CircleUp | Regime::TriangleUp => Orientation::RightSideUp,
            Regime::CircleDown | Regime::TriangleDown => Orientation::UpsideDown,
        }
    }
}

/// Alive, dead or finished, with the timer of the current state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    /// Seconds since death; the next attempt starts after the death delay
    Dead { timer: f64 },
    /// Seconds since crossing the level end
    Won { timer: f64, win_screen_shown: bool },
}

impl LifeState {
    pub fn is_alive(&self) -> bool {
        matches!(self, LifeState::Alive)
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, LifeState::Dead { .. })
    }

    pub fn is_won(&self) -> bool {
        matches!(self, LifeState::Won { .. })
    }

    pub fn death_timer(&self) -> f64 {
        match self {
            LifeState::Dead { timer } => *timer,
            _ => 0.0,
        }
    }

    pub fn win_timer(&self) -> f64 {
        match self {
            LifeState::Won { timer, .. } => *timer,
            _ => 0.0,
        }
    }
}

/// Player pose handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub shape: ShapeMode,
    pub orientation: Orientation,
}

/// The player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Left edge in blocks (0 = level start)
    pub x: f64,
    /// Bottom edge in blocks (0 = ground line)
    pub y: f64,
    /// Vertical speed in blocks/s
    pub velocity_y: f64,
    /// Radians; circle roll or triangle heading
    pub rotation: f64,
    pub shape: ShapeMode,
    pub orientation: Orientation,
    pub life: LifeState,
    /// Jump button is down
    pub jump_input_held: bool,
    /// The current press has already been spent on a jump or ring
    pub jump_edge_held: bool,
    /// Total jumps (UI statistic)
    pub jump_count: u32,
    /// Sticky once triangle flight has been used
    pub has_used_triangle_mode: bool,
    /// Height of the last surface the player stood on
    pub last_ground_y: f64,
    /// Height of the drawn ground strip (fraction of screen height)
    pub ground_strip: f64,
}

impl PlayerState {
    /// A player standing on the ground line at `x`
    pub fn at(x: f64) -> Self {
        Self {
            x,
            y: 0.0,
            velocity_y: 0.0,
            rotation: 0.0,
            shape: ShapeMode::Circle,
            orientation: Orientation::RightSideUp,
            life: LifeState::Alive,
            jump_input_held: false,
            jump_edge_held: false,
            jump_count: 0,
            has_used_triangle_mode: false,
            last_ground_y: 0.0,
            ground_strip: GROUND_STRIP_BASE,
        }
    }

    #[inline]
    pub fn regime(&self) -> Regime {
        Regime::of(self.shape, self.orientation)
    }

    /// Center of the player's circle
    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + PLAYER_RADIUS, self.y + PLAYER_RADIUS)
    }

    pub fn pose(&self) -> Pose {
        Pose {
            x: self.x,
            y: self.y,
            rotation: self.rotation,
            shape: self.shape,
            orientation: self.orientation,
        }
    }
}

/// Discrete things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Touched down on the floor (or the ceiling while upside down)
    Landed,
    Jumped,
    Died { x: f64 },
    WonLevel,
    /// Fly-out finished; the UI should show the win screen
    ShowWinScreen,
    CheckpointCreated { x: f64 },
    /// Rolled back to the previous checkpoint after repeated deaths
    CheckpointDeleted { x: f64, restored_x: f64 },
    /// A new attempt began in `practice` mode. `previous_progress` is where
    /// the last one ended and `previous_practice` the mode it was played in.
    AttemptStarted {
        attempt: u32,
        practice: bool,
        previous_practice: bool,
        previous_progress: f64,
    },
    ShapeChanged(ShapeMode),
    OrientationChanged(Orientation),
    /// First ever triangle flight this session (hides the flight tutorial)
    TriangleModeFirstUsed,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerState,
    pub checkpoints: CheckpointManager,
    /// Respawn from checkpoints instead of restarting the level
    pub practice_mode: bool,
    /// Current attempt number, starting at 1
    pub attempt: u32,
    /// Physics constants
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Width of the grid the last tick ran against
    #[serde(default)]
    pub level_width: Option<f64>,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh level start with default tuning
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        let player = PlayerState::at(LEVEL_START_X);
        Self {
            checkpoints: CheckpointManager::new(Checkpoint::from_player(&player)),
            player,
            practice_mode: false,
            attempt: 1,
            tuning,
            time_ticks: 0,
            level_width: None,
            events: Vec::new(),
        }
    }

    /// Push an event for this tick's report
    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Press or release the jump input; applied before the next tick.
    /// Presses are ignored while dead or finished.
    pub fn set_jump_held(&mut self, held: bool) {
        let player = &mut self.player;
        if held {
            if player.life.is_alive() {
                player.jump_input_held = true;
            }
        } else {
            player.jump_input_held = false;
            player.jump_edge_held = false;
        }
    }

    /// Progress of the current run, or 0 before the first tick
    pub fn progress(&self) -> f64 {
        self.level_width
            .map_or(0.0, |width| progress_fraction(self.player.x, width))
    }

    /// Switch between practice and normal play. Leaving practice mode ends the
    /// practice run and starts a fresh normal attempt; entering it keeps the
    /// current run going.
    pub fn set_practice_mode(&mut self, practice: bool) {
        if practice == self.practice_mode {
            return;
        }
        let previous_progress = self.progress();
        self.practice_mode = practice;
        log::info!("Practice mode {}", if practice { "on" } else { "off" });
        if !practice {
            self.begin_attempt(true, previous_progress, RETRY_START_X);
        }
    }

    /// Start the level over from the very beginning in normal mode
    pub fn restart_from_level_start(&mut self) {
        let previous_practice = self.practice_mode;
        let previous_progress = self.progress();
        self.practice_mode = false;
        self.attempt = 0;
        self.time_ticks = 0;
        self.player.jump_count = 0;
        self.begin_attempt(previous_practice, previous_progress, LEVEL_START_X);
    }

    /// Respawn after a death. `previous_progress` is the progress of the
    /// attempt that just ended, forwarded to persistence.
    pub fn start_next_attempt(&mut self, previous_progress: f64) {
        self.begin_attempt(self.practice_mode, previous_progress, RETRY_START_X);
    }

    /// Normal attempts start at `start_x`; practice attempts at the current
    /// checkpoint.
    fn begin_attempt(&mut self, previous_practice: bool, previous_progress: f64, start_x: f64) {
        self.attempt += 1;

        let level_height = self.tuning.level_height;
        let player = &mut self.player;
        player.rotation = 0.0;

        if self.practice_mode {
            if let Some(rolled_back) = self.checkpoints.on_death(
                player.x,
                self.tuning.checkpoint_death_radius,
                self.tuning.checkpoint_death_limit,
            ) {
                log::info!(
                    "Checkpoint at x={:.1} deleted, back to x={:.1}",
                    rolled_back.deleted_x,
                    rolled_back.restored_x
                );
                self.events.push(GameEvent::CheckpointDeleted {
                    x: rolled_back.deleted_x,
                    restored_x: rolled_back.restored_x,
                });
            }
            self.checkpoints.current().restore_into(player);
        } else {
            let start = PlayerState::at(start_x);
            player.x = start.x;
            player.y = start.y;
            player.velocity_y = start.velocity_y;
            player.shape = start.shape;
            player.orientation = start.orientation;
            self.checkpoints.reset_to(Checkpoint::from_player(player));
        }

        player.ground_strip = player
            .regime()
            .ground_strip_target(player.y, player.y, level_height);
        player.last_ground_y = player.y;
        player.jump_input_held = false;
        player.jump_edge_held = false;
        player.life = LifeState::Alive;

        log::info!(
            "Attempt {} ({}) from x={:.1}",
            self.attempt,
            if self.practice_mode { "practice" } else { "normal" },
            self.player.x
        );
        self.events.push(GameEvent::AttemptStarted {
            attempt: self.attempt,
            practice: self.practice_mode,
            previous_practice,
            previous_progress,
        });
    }
}

/// Per-tick snapshot for renderer, UI, audio and persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub pose: Pose,
    pub life: LifeState,
    /// Fraction of the level completed, in [0, 1]
    pub progress: f64,
    /// Ground strip height for the renderer
    pub ground_strip: f64,
    pub attempt: u32,
    pub jump_count: u32,
    pub has_used_triangle_mode: bool,
    pub events: Vec<GameEvent>,
}
