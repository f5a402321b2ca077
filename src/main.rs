//! Rotamaze headless driver
//!
//! Plays both engines with a scripted bot and logs what happens.
//! Usage: `rotamaze [settings.json] [seed]`. Set `RUST_LOG=debug` for
//! per-event output.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use rotamaze::consts::*;
use rotamaze::maze::{self, Direction, MazeEvent, MazeGame, MazeInput, MazePhase};
use rotamaze::space::{self, SpaceEvent, SpaceInput, SpaceState};
use rotamaze::{Settings, polar_to_cartesian};

/// Keys the maze bot can press
const MAZE_MOVE_KEYS: [char; 4] = ['w', 'a', 's', 'd'];

/// Keyboard mapping for the maze
fn maze_key(key: char) -> Option<MazeInput> {
    let input = match key {
        'w' => MazeInput::movement(Direction::Forward),
        's' => MazeInput::movement(Direction::Backward),
        'a' => MazeInput::movement(Direction::Left),
        'd' => MazeInput::movement(Direction::Right),
        ' ' => MazeInput {
            advance: true,
            ..Default::default()
        },
        'e' => MazeInput {
            pick_note: true,
            ..Default::default()
        },
        'r' => MazeInput {
            reset: true,
            ..Default::default()
        },
        _ => return None,
    };
    Some(input)
}

/// Keyboard mapping for the orbit game (clicks arrive separately)
fn space_key(key: char) -> Option<SpaceInput> {
    match key {
        '1'..='3' => Some(SpaceInput {
            preset: key.to_digit(10).map(|d| d as usize - 1),
            ..Default::default()
        }),
        'r' => Some(SpaceInput {
            reset: true,
            ..Default::default()
        }),
        _ => None,
    }
}

fn run_maze(settings: &Settings, seed: u64, steps: usize) {
    let mut game = MazeGame::new(seed, settings.maze.clone());
    let mut bot = Pcg32::seed_from_u64(seed ^ 0x5eed);

    for _ in 0..steps {
        let key = if game.is_over() {
            'r'
        } else if game.phase == MazePhase::AtEnd {
            ' '
        } else if game.presence.note && !game.note_read {
            'e'
        } else {
            MAZE_MOVE_KEYS[bot.random_range(0..MAZE_MOVE_KEYS.len())]
        };
        let Some(input) = maze_key(key) else {
            continue;
        };
        maze::tick(&mut game, &input);

        for event in &game.events {
            match event {
                MazeEvent::Advanced { size } => log::info!("Escaped! Next maze is {}x{}", size, size),
                MazeEvent::NoteRead(message) if !message.is_empty() => {
                    log::info!("The note reads: {}", message)
                }
                MazeEvent::Visited(kind) => log::info!("Found the {}", kind.as_str()),
                MazeEvent::Ended(encounter) => log::info!("Run over: {:?}", encounter),
                other => log::debug!("{:?}", other),
            }
        }
    }
    log::info!(
        "Maze demo finished: score {}, size {}, phase {:?}",
        game.score,
        game.size,
        game.phase
    );
}

/// Fixed-step wrapper around the orbit simulation
struct SpaceRunner {
    state: SpaceState,
    accumulator: f64,
    input: SpaceInput,
}

impl SpaceRunner {
    fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            state: SpaceState::new(seed, settings.space.clone()),
            accumulator: 0.0,
            input: SpaceInput::default(),
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f64) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            space::tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &self.state.events {
                match event {
                    SpaceEvent::LevelComplete { number } => {
                        log::info!("Level {} cleared at {:.1}s", number, self.state.time)
                    }
                    SpaceEvent::Crashed { id, penalty } => {
                        log::info!("Body {} burned up (-{})", id, penalty)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }
    }
}

fn run_space(settings: &Settings, seed: u64, seconds: f64) {
    let mut runner = SpaceRunner::new(settings, seed);
    let mut bot = Pcg32::seed_from_u64(seed ^ 0x0b17);
    let frame = 1.0 / 30.0;
    let mut elapsed = 0.0;

    while elapsed < seconds {
        // Top up the system whenever the current level needs more planets
        let needed = runner
            .state
            .current_level()
            .map_or(0, |level| level.target_planets);
        if runner.state.planet_count() < needed && bot.random_bool(0.05) {
            if let Some(input) = space_key('1') {
                runner.input = input;
            }
            let distance = bot.random_range(80.0..300.0);
            let angle = bot.random_range(0.0..std::f64::consts::TAU);
            let click: DVec2 = runner.state.tuning.star_pos + polar_to_cartesian(distance, angle);
            runner.input.place = Some(click);
        }
        runner.update(frame);
        elapsed += frame;
    }
    let state = &runner.state;
    log::info!(
        "Orbit demo finished: score {}, level index {}, {} planets",
        state.score,
        state.level_index,
        state.planet_count()
    );
}

fn main() {
    env_logger::init();
    log::info!("Rotamaze (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| SETTINGS_FILE.to_string());
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let settings = Settings::load_or_default(&settings_path);
    run_maze(&settings, seed, 2000);
    run_space(&settings, seed, 120.0);
}
