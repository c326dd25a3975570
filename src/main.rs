//! WRLD SVR entry point
//!
//! Runs a headless demo session: the autopilot presses keys through the
//! default bindings until the game ends or the frame cap is reached. A windowed host drives the same loop and
//! draws `GameState::draw_list` each frame instead of logging.
//!
//! Environment:
//! - `WRLD_SVR_SETTINGS`: path to a settings JSON file
//! - `WRLD_SVR_SEED`: RNG seed (defaults to the clock)

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use wrld_svr::consts::SCREEN_TITLE;
use wrld_svr::sim::GameEvent;
use wrld_svr::{GameState, KeyMap, Settings, TickInput, autopilot, tick};

/// Frames between progress reports
const REPORT_INTERVAL: u64 = 600;

/// Headless host holding the session and its key bindings
struct Game {
    state: GameState,
    keymap: KeyMap,
}

impl Game {
    fn new(settings: Settings, seed: u64) -> Self {
        Self {
            state: GameState::new(settings, seed),
            keymap: KeyMap::default(),
        }
    }

    /// One frame callback
    fn update(&mut self) {
        for event in autopilot::steer(&self.state) {
            self.state.handle_key_event(&self.keymap, &event);
        }
        tick(&mut self.state, &TickInput::default());

        for event in &self.state.events {
            if let GameEvent::Crash { lives_left } = event {
                log::info!("Frame {}: ship hit, {} lives left", self.state.frame_count, lives_left);
            }
        }

        if self.state.frame_count % REPORT_INTERVAL == 0 {
            let hud = self.state.hud();
            log::info!(
                "Frame {}: {} | sprites: {}",
                self.state.frame_count,
                hud.lines().join(" | "),
                self.state.draw_list().len()
            );
        }
    }

    fn run(&mut self) {
        let cap = self.state.settings.demo_frames;
        while !self.state.game_over() && self.state.frame_count < cap {
            self.update();
        }
    }
}

fn seed_from_env() -> u64 {
    if let Ok(raw) = std::env::var("WRLD_SVR_SEED") {
        match raw.parse() {
            Ok(seed) => return seed,
            Err(e) => log::warn!("Ignoring WRLD_SVR_SEED={raw:?}: {e}"),
        }
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("{SCREEN_TITLE} (headless) starting...");

    let settings_path = std::env::var_os("WRLD_SVR_SETTINGS").map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());
    let seed = seed_from_env();
    log::info!("Game initialized with seed: {seed}");

    let mut game = Game::new(settings, seed);
    game.run();

    let hud = game.state.hud();
    log::info!(
        "Finished after {} frames: score {}, {} lives, {} asteroids left{}",
        game.state.frame_count,
        hud.score,
        game.state.lives,
        hud.asteroid_count,
        if hud.game_over { " (game over)" } else { "" }
    );
}
