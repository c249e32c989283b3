//! Fixed timestep simulation tick
//!
//! Advances the player one step: roll, scroll, integrate, resolve ground and
//! ceiling, then hazards, portals, pads, checkpoints and the life timers, in
//! that order.

use super::collision::{any_pad_intersects, ceiling_y, ground_y, hazard_intersects, ring_intersects};
use super::grid::TileSource;
use super::mode::{Resting, update_mode};
use super::progress::{crossed_level_end, progress_fraction, win_screen_due};
use super::state::{GameEvent, GameState, LifeState, PlayerState, Regime, ShapeMode, TickReport};
use crate::approach;
use crate::consts::*;
use crate::tuning::Tuning;

/// Input edges for a single tick, applied before the step
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump button went down (click/tap/space)
    pub jump_pressed: bool,
    /// Jump button went up
    pub jump_released: bool,
}

impl TickInput {
    pub fn press() -> Self {
        Self {
            jump_pressed: true,
            ..Default::default()
        }
    }

    pub fn release() -> Self {
        Self {
            jump_released: true,
            ..Default::default()
        }
    }
}

/// Advance the game state by one timestep and report what happened
pub fn tick<G: TileSource + ?Sized>(
    state: &mut GameState,
    grid: &G,
    input: &TickInput,
    dt: f64,
) -> TickReport {
    debug_assert!(dt.is_finite() && dt >= 0.0, "dt must be finite and non-negative: {dt}");

    if input.jump_pressed {
        state.set_jump_held(true);
    }
    if input.jump_released {
        state.set_jump_held(false);
    }

    let level_width = grid.width() as f64;
    state.level_width = Some(level_width);
    step_player(state, grid, dt);
    update_life(state, level_width, dt);
    state.time_ticks += 1;

    let events = state.drain_events();
    let player = &state.player;
    debug_assert!(player.x.is_finite() && player.y.is_finite());
    let (lo, hi) = player.regime().velocity_bounds(&state.tuning);
    debug_assert!(
        (lo..=hi).contains(&player.velocity_y),
        "velocity {} outside {:?} bounds",
        player.velocity_y,
        player.regime()
    );

    TickReport {
        pose: player.pose(),
        life: player.life,
        progress: progress_fraction(player.x, level_width),
        ground_strip: player.ground_strip,
        attempt: state.attempt,
        jump_count: player.jump_count,
        has_used_triangle_mode: player.has_used_triangle_mode,
        events,
    }
}

fn jump(player: &mut PlayerState, regime: Regime, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    player.velocity_y = regime.jump_velocity(tuning);
    player.jump_edge_held = true;
    player.jump_count += 1;
    events.push(GameEvent::Jumped);
}

/// Movement, contacts and mode changes
fn step_player<G: TileSource + ?Sized>(state: &mut GameState, grid: &G, dt: f64) {
    let practice = state.practice_mode;
    let GameState {
        player,
        checkpoints,
        tuning,
        events,
        ..
    } = state;

    let regime = player.regime();
    let alive = player.life.is_alive();

    player.rotation = regime.roll(player.rotation, dt, tuning);
    if alive {
        player.x += tuning.x_speed * dt;
    }

    let ground = ground_y(player, grid);
    let ceiling_rest = ceiling_y(player, grid, tuning.level_height) - PLAYER_WIDTH;

    if !player.life.is_won() && regime.is_airborne(player.y, player.velocity_y, ground, ceiling_rest) {
        player.velocity_y = regime.integrate_airborne(player.velocity_y, player.jump_input_held, dt, tuning);
        player.y += player.velocity_y * dt;
    }

    let mut just_landed = false;
    let mut hit_ceiling = false;

    if player.y <= ground && player.velocity_y <= 0.0 {
        just_landed = player.velocity_y < 0.0;
        player.velocity_y = 0.0;
        player.y = ground;
        player.last_ground_y = ground;

        // Falling onto the floor while inverted is the mirror of a ceiling strike
        if just_landed && regime == Regime::CircleDown {
            hit_ceiling = true;
        }
        if player.jump_input_held && regime.shape() == ShapeMode::Circle {
            jump(player, regime, tuning, events);
        }
    } else if player.jump_input_held && !player.jump_edge_held && ring_intersects(player, grid) {
        jump(player, regime, tuning, events);
    }

    if player.y >= ceiling_rest && player.velocity_y >= 0.0 {
        match regime {
            Regime::TriangleUp | Regime::TriangleDown => {
                player.velocity_y = 0.0;
                player.y = ceiling_rest;
            }
            Regime::CircleDown => {
                just_landed = player.velocity_y > 0.0;
                player.velocity_y = 0.0;
                player.y = ceiling_rest;
                player.last_ground_y = ceiling_rest;
                if player.jump_input_held {
                    jump(player, regime, tuning, events);
                }
            }
            Regime::CircleUp => hit_ceiling = true,
        }
    }

    if just_landed && !hit_ceiling && alive {
        log::debug!("Landed at x={:.2} y={:.2}", player.x, player.y);
        events.push(GameEvent::Landed);
    }

    if regime.shape() == ShapeMode::Triangle {
        if player.jump_input_held {
            player.velocity_y = regime.apply_flight(player.velocity_y, dt, tuning);
            if !player.has_used_triangle_mode {
                player.has_used_triangle_mode = true;
                events.push(GameEvent::TriangleModeFirstUsed);
            }
        }
        let resting = if player.y == ground {
            Resting::Ground
        } else if player.y == ceiling_rest {
            Resting::Ceiling
        } else {
            Resting::Airborne
        };
        player.rotation = regime.triangle_heading(player.rotation, player.velocity_y, resting, dt, tuning);
    }

    // Ground strip follows the player but freezes once the run is over
    if alive {
        let target = regime.ground_strip_target(player.last_ground_y, player.y, tuning.level_height);
        if (target - player.ground_strip).abs() > regime.ground_strip_tolerance() {
            let speed = GROUND_STRIP_MOVE_SPEED * player.velocity_y.abs().max(tuning.x_speed);
            player.ground_strip = approach(player.ground_strip, target, speed * dt);
        }
    }

    if alive && (hit_ceiling || hazard_intersects(player, grid)) {
        player.life = LifeState::Dead { timer: 0.0 };
        log::info!("Died at x={:.2}", player.x);
        events.push(GameEvent::Died { x: player.x });
    }

    let change = update_mode(player, grid);
    if let Some(shape) = change.shape {
        log::debug!("Shape -> {:?} at x={:.2}", shape, player.x);
        events.push(GameEvent::ShapeChanged(shape));
    }
    if let Some(orientation) = change.orientation {
        log::debug!("Orientation -> {:?} at x={:.2}", orientation, player.x);
        events.push(GameEvent::OrientationChanged(orientation));
    }

    if any_pad_intersects(player, grid) {
        player.velocity_y = player.regime().pad_velocity(tuning);
        player.last_ground_y = player.y;
    }

    player.velocity_y = player.regime().clamp_velocity(player.velocity_y, tuning);

    if practice && checkpoints.is_due(player, just_landed, tuning.checkpoint_spacing) {
        checkpoints.create(player);
        log::info!("Checkpoint created at x={:.2}", player.x);
        events.push(GameEvent::CheckpointCreated { x: player.x });
    }
}

/// Death delay, respawn, level end and the win-screen signal
fn update_life(state: &mut GameState, level_width: f64, dt: f64) {
    match state.player.life {
        LifeState::Dead { timer } => {
            let timer = timer + dt;
            state.player.jump_input_held = false;
            state.player.life = LifeState::Dead { timer };
            if timer > state.tuning.death_delay {
                let previous_progress = state.progress();
                state.start_next_attempt(previous_progress);
            }
            return;
        }
        LifeState::Alive if crossed_level_end(state.player.x, level_width) => {
            state.player.life = LifeState::Won {
                timer: 0.0,
                win_screen_shown: false,
            };
            state.player.jump_input_held = false;
            log::info!("Level complete on attempt {}", state.attempt);
            state.events.push(GameEvent::WonLevel);
        }
        _ => {}
    }

    if let LifeState::Won {
        timer,
        win_screen_shown,
    } = &mut state.player.life
    {
        *timer += dt;
        if !*win_screen_shown
            && win_screen_due(*timer, state.tuning.win_animation_length, state.tuning.win_screen_delay)
        {
            *win_screen_shown = true;
            state.events.push(GameEvent::ShowWinScreen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::TileGrid;
    use crate::sim::state::Orientation;
    use crate::sim::tile::TileKind;

    fn flat(width: usize) -> TileGrid {
        TileGrid::new(width, LEVEL_HEIGHT as usize)
    }

    fn run<G: TileSource>(state: &mut GameState, grid: &G, ticks: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(tick(state, grid, &TickInput::default(), SIM_DT).events);
        }
        events
    }

    #[test]
    fn test_reaching_level_end_wins() {
        let grid = flat(40);
        let mut state = GameState::new();
        assert_eq!(state.player.x, LEVEL_START_X);

        let mut report = tick(&mut state, &grid, &TickInput::default(), SIM_DT);
        let mut ticks = 1;
        while !report.life.is_won() && ticks < 2000 {
            report = tick(&mut state, &grid, &TickInput::default(), SIM_DT);
            ticks += 1;
        }

        assert!(report.life.is_won());
        assert!(report.events.contains(&GameEvent::WonLevel));
        assert_eq!(report.progress, 1.0);

        // Frozen in place while the fly-out plays
        let x = state.player.x;
        let events = run(&mut state, &grid, 1000);
        assert_eq!(state.player.x, x);
        let shown = events.iter().filter(|e| **e == GameEvent::ShowWinScreen).count();
        assert_eq!(shown, 1);
    }

    #[test]
    fn test_landing_snaps_to_ground() {
        let tiles = (0..40).map(|col| (col, 1, TileKind::Solid));
        let grid = TileGrid::from_tiles(60, tiles);
        let mut state = GameState::new();
        state.player.x = 5.0;
        state.player.y = 4.0;

        let mut landed = false;
        for _ in 0..240 {
            let report = tick(&mut state, &grid, &TickInput::default(), SIM_DT);
            if report.events.contains(&GameEvent::Landed) {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert_eq!(state.player.y, 2.0);
        assert_eq!(state.player.velocity_y, 0.0);
        assert_eq!(state.player.last_ground_y, 2.0);
        assert!(state.player.life.is_alive());
    }

    #[test]
    fn test_spike_kills_same_tick_then_respawns() {
        let grid = TileGrid::from_tiles(40, [(5, 0, TileKind::Spike)]);
        let mut state = GameState::new();
        state.player.x = 4.9;

        let report = tick(&mut state, &grid, &TickInput::default(), SIM_DT);
        assert!(report.life.is_dead());
        assert!(matches!(report.events[..], [GameEvent::Died { .. }]));

        // Dead: no scrolling, presses ignored
        let x = state.player.x;
        tick(&mut state, &grid, &TickInput::press(), SIM_DT);
        assert_eq!(state.player.x, x);
        assert!(!state.player.jump_input_held);

        let events = run(&mut state, &grid, 240);
        assert!(events.iter().any(|e| matches!(e, GameEvent::AttemptStarted { attempt: 2, .. })));
        assert!(state.player.life.is_alive());
        assert_eq!(state.attempt, 2);
        assert!(state.player.x < 0.0);
    }

    #[test]
    fn test_ground_jump_while_held() {
        let grid = flat(100);
        let mut state = GameState::new();
        state.player.x = 0.0;

        let report = tick(&mut state, &grid, &TickInput::press(), SIM_DT);
        assert!(report.events.contains(&GameEvent::Jumped));
        assert_eq!(report.jump_count, 1);
        assert_eq!(state.player.velocity_y, state.tuning.jump_y_speed);

        // Holding re-jumps on every landing
        let events = run(&mut state, &grid, 240);
        let jumps = events.iter().filter(|e| **e == GameEvent::Jumped).count();
        assert!(jumps >= 1);
        assert_eq!(state.player.jump_count as usize, jumps + 1);

        tick(&mut state, &grid, &TickInput::release(), SIM_DT);
        run(&mut state, &grid, 240);
        assert_eq!(state.player.y, 0.0);
    }

    #[test]
    fn test_ring_fires_once_per_press() {
        let grid = TileGrid::from_tiles(40, [(10, 3, TileKind::YellowRing)]);
        let mut state = GameState::new();
        state.player.x = 9.6;
        state.player.y = 2.5;

        let report = tick(&mut state, &grid, &TickInput::press(), SIM_DT);
        assert!(report.events.contains(&GameEvent::Jumped));
        assert_eq!(state.player.velocity_y, state.tuning.jump_y_speed);

        let events = run(&mut state, &grid, 10);
        assert!(!events.contains(&GameEvent::Jumped));
        assert_eq!(state.player.jump_count, 1);
    }

    #[test]
    fn test_ring_ignored_without_press() {
        let grid = TileGrid::from_tiles(40, [(10, 3, TileKind::YellowRing)]);
        let mut state = GameState::new();
        state.player.x = 9.6;
        state.player.y = 2.5;

        let events = run(&mut state, &grid, 5);
        assert!(!events.contains(&GameEvent::Jumped));
        assert!(state.player.velocity_y < 0.0);
    }

    #[test]
    fn test_pad_launches() {
        let grid = TileGrid::from_tiles(40, [(10, 0, TileKind::YellowPad)]);
        let mut state = GameState::new();
        state.player.x = 9.5;

        tick(&mut state, &grid, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.velocity_y, state.tuning.pad_y_speed);
        assert_eq!(state.player.jump_count, 0);
    }

    #[test]
    fn test_pad_clamped_in_triangle_mode() {
        let grid = TileGrid::from_tiles(40, [(10, 0, TileKind::YellowPad)]);
        let mut state = GameState::new();
        state.player.x = 9.5;
        state.player.shape = ShapeMode::Triangle;

        tick(&mut state, &grid, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.velocity_y, state.tuning.triangle_max_y_speed);
    }

    #[test]
    fn test_practice_checkpoint_and_rollback() {
        let grid = TileGrid::from_tiles(100, [(25, 0, TileKind::Spike)]);
        let mut state = GameState::new();
        state.set_practice_mode(true);
        state.player.x = 19.0;
        state.player.y = 0.001;
        state.player.velocity_y = -1.0;

        let report = tick(&mut state, &grid, &TickInput::default(), SIM_DT);
        assert!(report.events.contains(&GameEvent::Landed));
        let created = state.checkpoints.current().x;
        assert!(report.events.contains(&GameEvent::CheckpointCreated { x: created }));
        assert!(created > 19.0);

        let mut deaths = 0;
        let mut rollback = None;
        for _ in 0..3000 {
            let report = tick(&mut state, &grid, &TickInput::default(), SIM_DT);
            for event in report.events {
                match event {
                    GameEvent::Died { .. } => deaths += 1,
                    GameEvent::CheckpointDeleted { x, restored_x } => rollback = Some((x, restored_x)),
                    _ => {}
                }
            }
            if rollback.is_some() {
                break;
            }
        }

        assert_eq!(deaths, 3);
        assert_eq!(rollback, Some((created, LEVEL_START_X)));
        assert_eq!(state.checkpoints.current().x, LEVEL_START_X);
        assert_eq!(state.checkpoints.death_count(), 0);
        assert_eq!(state.player.x, LEVEL_START_X);
        assert!(state.practice_mode);
    }

    #[test]
    fn test_practice_respawns_at_checkpoint() {
        let grid = TileGrid::from_tiles(100, [(25, 0, TileKind::Spike)]);
        let mut state = GameState::new();
        state.set_practice_mode(true);
        state.player.x = 19.0;
        state.player.y = 0.001;
        state.player.velocity_y = -1.0;
        tick(&mut state, &grid, &TickInput::default(), SIM_DT);
        let created = state.checkpoints.current().x;

        let events = run(&mut state, &grid, 420);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Died { .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::AttemptStarted { practice: true, .. })));
        // Respawned at the checkpoint, a little way along since
        assert!(state.player.x >= created && state.player.x < 25.0);
        assert_eq!(state.checkpoints.death_count(), 1);
    }

    #[test]
    fn test_upside_down_circle_lands_on_ceiling() {
        let grid = flat(100);
        let mut state = GameState::new();
        state.player.x = 0.0;
        state.player.y = 8.5;
        state.player.orientation = Orientation::UpsideDown;

        let events = run(&mut state, &grid, 120);
        let rest = LEVEL_HEIGHT - 1.0 - PLAYER_WIDTH;
        assert!(state.player.life.is_alive());
        assert_eq!(state.player.y, rest);
        assert_eq!(state.player.velocity_y, 0.0);
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Landed).count(), 1);
    }

    #[test]
    fn test_upside_down_circle_leaves_floor() {
        let grid = flat(100);
        let mut state = GameState::new();
        state.player.x = 0.0;
        state.player.orientation = Orientation::UpsideDown;

        tick(&mut state, &grid, &TickInput::default(), SIM_DT);
        assert!(state.player.y > 0.0);
        assert!(state.player.velocity_y > 0.0);
        assert!(state.player.life.is_alive());
    }

    #[test]
    fn test_upside_down_floor_landing_is_fatal() {
        let grid = flat(100);
        let mut state = GameState::new();
        state.player.x = 0.0;
        state.player.y = 0.01;
        state.player.velocity_y = -20.0;
        state.player.orientation = Orientation::UpsideDown;

        let report = tick(&mut state, &grid, &TickInput::default(), SIM_DT);
        assert!(report.life.is_dead());
    }

    #[test]
    fn test_inverted_circle_falls_up_past_fall_cap() {
        let tuning = Tuning {
            level_height: 40.0,
            ..Tuning::default()
        };
        let grid = TileGrid::new(80, 40);
        let mut state = GameState::with_tuning(tuning);
        state.player.x = 5.0;
        state.player.y = 0.5;
        state.player.velocity_y = 0.1;
        state.player.orientation = Orientation::UpsideDown;

        let mut fastest: f64 = 0.0;
        for _ in 0..120 {
            tick(&mut state, &grid, &TickInput::default(), SIM_DT);
            fastest = fastest.max(state.player.velocity_y);
        }

        assert!(state.player.life.is_alive());
        assert!(state.player.y > 4.5);
        assert!(fastest > -state.tuning.min_y_speed);
    }

    #[test]
    fn test_upside_down_velocity_respects_circle_bound() {
        let grid = TileGrid::from_tiles(100, [(6, 9, TileKind::YellowPadInverted)]);
        let mut state = GameState::new();
        state.player.x = 0.0;
        state.player.y = 9.0;
        state.player.orientation = Orientation::UpsideDown;

        let mut launched = false;
        for _ in 0..480 {
            tick(&mut state, &grid, &TickInput::default(), SIM_DT);
            assert_eq!(state.player.regime(), Regime::CircleDown);
            assert!(state.player.velocity_y >= state.tuning.min_y_speed);
            launched |= state.player.velocity_y == state.tuning.min_y_speed;
        }

        // The inverted pad's impulse is floored at the fall cap
        assert!(launched);
        assert!(state.player.life.is_alive());
    }

    #[test]
    fn test_ceiling_jump_while_held_upside_down() {
        let grid = flat(100);
        let mut state = GameState::new();
        let rest = LEVEL_HEIGHT - 1.0 - PLAYER_WIDTH;
        state.player.x = 0.0;
        state.player.y = rest;
        state.player.orientation = Orientation::UpsideDown;

        let report = tick(&mut state, &grid, &TickInput::press(), SIM_DT);
        assert!(report.events.contains(&GameEvent::Jumped));
        assert_eq!(state.player.velocity_y, -state.tuning.jump_y_speed);

        // Holding re-jumps off the ceiling on every landing
        let events = run(&mut state, &grid, 240);
        let jumps = events.iter().filter(|e| **e == GameEvent::Jumped).count();
        assert!(jumps >= 1);
        assert_eq!(state.player.jump_count as usize, jumps + 1);
        assert!(state.player.life.is_alive());

        tick(&mut state, &grid, &TickInput::release(), SIM_DT);
        run(&mut state, &grid, 240);
        assert_eq!(state.player.y, rest);
        assert!(state.player.life.is_alive());
    }

    #[test]
    fn test_circle_ceiling_strike_is_fatal() {
        let grid = TileGrid::from_tiles(40, [(10, 3, TileKind::Solid)]);
        let mut state = GameState::new();
        state.player.x = 9.6;
        state.player.y = 1.5;
        state.player.velocity_y = 15.0;

        let events = run(&mut state, &grid, 30);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Died { .. })));
        assert!(state.player.life.is_dead());
    }

    #[test]
    fn test_triangle_flies_to_ceiling() {
        let grid = flat(200);
        let mut state = GameState::new();
        state.player.x = 0.0;
        state.player.shape = ShapeMode::Triangle;

        let report = tick(&mut state, &grid, &TickInput::press(), SIM_DT);
        assert!(report.events.contains(&GameEvent::TriangleModeFirstUsed));
        assert!(report.has_used_triangle_mode);
        assert_eq!(report.jump_count, 0);

        let events = run(&mut state, &grid, 600);
        assert!(!events.contains(&GameEvent::TriangleModeFirstUsed));
        assert_eq!(state.player.y, LEVEL_HEIGHT - 1.0 - PLAYER_WIDTH);
        assert_eq!(state.player.rotation, 0.0);
        assert!(state.player.life.is_alive());

        // Released: sink back to the ground
        tick(&mut state, &grid, &TickInput::release(), SIM_DT);
        run(&mut state, &grid, 600);
        assert_eq!(state.player.y, 0.0);
        assert_eq!(state.player.velocity_y, 0.0);
    }

    #[test]
    fn test_triangle_points_along_velocity() {
        let grid = flat(200);
        let mut state = GameState::new();
        state.player.x = 0.0;
        state.player.y = 4.0;
        state.player.shape = ShapeMode::Triangle;

        tick(&mut state, &grid, &TickInput::default(), SIM_DT);
        let expected = (-state.player.velocity_y).atan2(state.tuning.x_speed);
        assert!(state.player.velocity_y < 0.0);
        assert_eq!(state.player.rotation, expected);
    }

    #[test]
    fn test_portal_switch_emits_event() {
        use crate::sim::tile::{PortalHalf, PortalKind};
        let portal = TileKind::Portal {
            kind: PortalKind::Triangle,
            half: PortalHalf::Bottom,
        };
        let grid = TileGrid::from_tiles(40, [(3, 0, portal)]);
        let mut state = GameState::new();
        state.player.x = 2.5;
        state.player.rotation = 2.0;

        let events = run(&mut state, &grid, 30);
        assert!(events.contains(&GameEvent::ShapeChanged(ShapeMode::Triangle)));
        assert_eq!(state.player.shape, ShapeMode::Triangle);
    }

    #[test]
    fn test_ground_strip_rises_with_player() {
        let tiles = (0..80).flat_map(|col| (0..4).map(move |row| (col, row, TileKind::Solid)));
        let grid = TileGrid::from_tiles(100, tiles);
        let mut state = GameState::new();
        state.player.x = 0.0;
        state.player.y = 4.0;
        state.player.last_ground_y = 4.0;

        run(&mut state, &grid, 240);
        let target = GROUND_STRIP_THRESHOLD - 4.0 / LEVEL_HEIGHT;
        assert!(state.player.ground_strip < GROUND_STRIP_BASE);
        assert!(state.player.ground_strip - target <= GROUND_STRIP_TOLERANCE + 1e-12);
    }

    #[test]
    fn test_determinism() {
        let grid = TileGrid::from_tiles(
            60,
            [
                (12, 0, TileKind::Spike),
                (20, 0, TileKind::YellowPad),
                (30, 2, TileKind::Solid),
            ],
        );
        let mut a = GameState::new();
        let mut b = GameState::new();
        for i in 0..2000 {
            let input = TickInput {
                jump_pressed: i % 90 == 0,
                jump_released: i % 90 == 30,
            };
            let ra = tick(&mut a, &grid, &input, SIM_DT);
            let rb = tick(&mut b, &grid, &input, SIM_DT);
            assert_eq!(ra, rb);
        }
    }

    mod proptests {
        use super::*;
        use crate::sim::tile::{PortalHalf, PortalKind};
        use proptest::prelude::*;

        fn tile_kind() -> impl Strategy<Value = TileKind> {
            prop_oneof![
                Just(TileKind::Solid),
                Just(TileKind::Spike),
                Just(TileKind::SpikeDown),
                Just(TileKind::SpikeLeft),
                Just(TileKind::YellowPad),
                Just(TileKind::YellowPadInverted),
                Just(TileKind::YellowRing),
                Just(TileKind::Portal {
                    kind: PortalKind::Triangle,
                    half: PortalHalf::Bottom
                }),
                Just(TileKind::Portal {
                    kind: PortalKind::Circle,
                    half: PortalHalf::Top
                }),
                Just(TileKind::Portal {
                    kind: PortalKind::UpsideDown,
                    half: PortalHalf::Bottom
                }),
                Just(TileKind::Portal {
                    kind: PortalKind::RightSideUp,
                    half: PortalHalf::Top
                }),
            ]
        }

        proptest! {
            #[test]
            fn invariants_hold_every_tick(
                tiles in prop::collection::vec((0usize..30, 0usize..8, tile_kind()), 0..40),
                presses in prop::collection::vec(any::<bool>(), 100..600),
                practice in any::<bool>(),
            ) {
                let grid = TileGrid::from_tiles(30, tiles);
                let mut state = GameState::new();
                state.set_practice_mode(practice);

                for held in presses {
                    let input = TickInput {
                        jump_pressed: held,
                        jump_released: !held,
                    };
                    let was_alive = state.player.life.is_alive();
                    let x_before = state.player.x;

                    let report = tick(&mut state, &grid, &input, SIM_DT);

                    prop_assert!((0.0..=1.0).contains(&report.progress));
                    let (lo, hi) = state.player.regime().velocity_bounds(&state.tuning);
                    prop_assert!(state.player.velocity_y >= lo && state.player.velocity_y <= hi);

                    let respawned = report
                        .events
                        .iter()
                        .any(|e| matches!(e, GameEvent::AttemptStarted { .. }));
                    if !respawned {
                        prop_assert!(report.pose.x >= x_before);
                        if !was_alive {
                            prop_assert_eq!(report.pose.x, x_before);
                        }
                    }

                    match report.life {
                        LifeState::Alive => {}
                        LifeState::Dead { timer } => {
                            prop_assert!(timer >= 0.0 && timer <= state.tuning.death_delay);
                        }
                        LifeState::Won { timer, .. } => {
                            prop_assert!(timer >= 0.0);
                        }
                    }
                }
            }

            #[test]
            fn progress_stays_in_unit_range(x in -1.0e6f64..1.0e6, width in 0usize..10_000) {
                let p = progress_fraction(x, width as f64);
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }
    }
}
