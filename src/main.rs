//! Shape Sprint headless runner
//!
//! Builds a demo level, drives the simulation at a fixed timestep from a
//! simulated 60 Hz frame clock, and plays it with a simple look-ahead
//! autopilot. Records are written to `records.json` unless `--records`
//! points elsewhere; `--tuning` loads physics constants from a JSON file.
//!
//! Usage: `shape-sprint [--tuning tuning.json] [--records records.json] [--practice]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use shape_sprint::consts::*;
    use shape_sprint::sim::{
        GameEvent, GameState, PortalHalf, PortalKind, TickInput, TileGrid, TileKind, TileSource, tick,
    };
    use shape_sprint::{PlayMode, Records, Tuning};

    #[derive(Parser)]
    #[command(name = "shape-sprint")]
    #[command(about = "Play the demo level headless with an autopilot")]
    struct Args {
        /// JSON file with physics constants
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Where best progress is loaded from and saved to
        #[arg(long, default_value = "records.json")]
        records: PathBuf,
        /// Respawn at checkpoints instead of restarting
        #[arg(long)]
        practice: bool,
    }

    const LEVEL_NAME: &str = "demo";
    const FRAME_DT: f64 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;
    const MAX_ATTEMPTS: u32 = 40;

    fn portal(kind: PortalKind, col: usize) -> [(usize, usize, TileKind); 2] {
        [
            (col, 0, TileKind::Portal { kind, half: PortalHalf::Bottom }),
            (col, 1, TileKind::Portal { kind, half: PortalHalf::Top }),
        ]
    }

    /// A short level touching every tile kind
    fn demo_level() -> TileGrid {
        let mut tiles = Vec::new();

        for col in [12, 20, 21, 34] {
            tiles.push((col, 0, TileKind::Spike));
        }
        for col in 44..52 {
            tiles.push((col, 0, TileKind::Solid));
        }
        tiles.push((50, 1, TileKind::Spike));
        tiles.push((58, 0, TileKind::YellowPad));
        tiles.push((64, 4, TileKind::YellowRing));

        tiles.extend(portal(PortalKind::Triangle, 72));
        for col in (78..100).step_by(6) {
            tiles.push((col, 9, TileKind::SpikeDown));
        }
        tiles.extend(portal(PortalKind::Circle, 104));

        TileGrid::from_tiles(120, tiles)
    }

    /// Hold jump when a hazard is coming up in the next couple of columns
    fn autopilot(state: &GameState, grid: &TileGrid) -> bool {
        let col = state.player.x.floor() as i64;
        let row = state.player.y.floor() as i64;
        (col + 1..=col + 2).any(|c| grid.is_hazard(c, row) || grid.is_solid(c, row))
    }

    struct Runner {
        state: GameState,
        grid: TileGrid,
        records: Records,
        accumulator: f64,
        held: bool,
    }

    impl Runner {
        /// Run simulation ticks for one frame
        fn update(&mut self, dt: f64) -> bool {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            let mut finished = false;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let want = autopilot(&self.state, &self.grid);
                let input = TickInput {
                    jump_pressed: want && !self.held,
                    jump_released: !want && self.held,
                };
                self.held = want;

                let mode = PlayMode::from_practice(self.state.practice_mode);
                let report = tick(&mut self.state, &self.grid, &input, SIM_DT);
                self.records.apply(LEVEL_NAME, &report, mode);

                for event in &report.events {
                    match event {
                        GameEvent::ShowWinScreen => finished = true,
                        GameEvent::AttemptStarted { previous_progress, .. } => {
                            log::info!("Previous attempt reached {:.0}%", previous_progress * 100.0);
                            // Jump state is cleared on respawn
                            self.held = false;
                        }
                        GameEvent::TriangleModeFirstUsed => log::info!("First triangle flight"),
                        _ => log::trace!("{:?}", event),
                    }
                }

                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            finished
        }
    }

    pub fn run() {
        let args = Args::parse();
        let tuning = match &args.tuning {
            Some(path) => Tuning::load_or_default(path),
            None => Tuning::default(),
        };

        let grid = demo_level();
        log::info!("Demo level: {} columns, {} tiles", grid.width(), grid.tile_count());

        let mut state = GameState::with_tuning(tuning);
        state.set_practice_mode(args.practice);

        let mut runner = Runner {
            state,
            grid,
            records: Records::load_or_default(&args.records),
            accumulator: 0.0,
            held: false,
        };

        let mut frames = 0;
        while frames < MAX_FRAMES && runner.state.attempt <= MAX_ATTEMPTS {
            if runner.update(FRAME_DT) {
                break;
            }
            frames += 1;
        }

        let state = &runner.state;
        if state.player.life.is_won() {
            log::info!("Beat the level in {} attempts ({} jumps)", state.attempt, state.player.jump_count);
        } else {
            log::warn!("Gave up after {} attempts", state.attempt);
        }

        if let Err(e) = runner.records.save(&args.records) {
            log::error!("Failed to save records to {}: {}", args.records.display(), e);
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shape Sprint (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is embedded by a web front end; nothing to run here
}
