//! Sky Volley entry point
//!
//! The browser build runs from the library (`platform::web`). Natively this
//! binary runs a headless autopilot session: it exercises the whole game
//! loop, persists progress next to the working directory, and logs a summary.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use sky_volley::audio::SilentAudio;
    use sky_volley::persistence::FileStore;
    use sky_volley::sim::{GamePhase, GameState, Pooled};
    use sky_volley::{Game, HostCommand, TickInput, Tuning};

    const SAVE_PATH: &str = "sky-volley-save.json";
    /// 10 minutes at 60 fps
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Steer under the lowest enemy and keep firing
    fn autopilot(state: &GameState) -> TickInput {
        let player = state.player.aabb();
        let target = state
            .enemies
            .pool
            .iter_active()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.aabb().center().x);

        let mut input = TickInput {
            fire: true,
            ..Default::default()
        };
        if let Some(x) = target {
            let center = player.center().x;
            input.left = x < center - 4.0;
            input.right = x > center + 4.0;
        }
        input
    }

    fn load_tuning(path: Option<String>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Could not load tuning from {} ({}), using defaults", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        let tuning = load_tuning(std::env::args().nth(1));
        let seed = sky_volley::platform::now_ms();
        log::info!("Sky Volley (headless) starting with seed {}", seed);

        let mut game = Game::new(
            seed,
            tuning,
            Box::new(FileStore::new(SAVE_PATH)),
            Box::new(SilentAudio::default()),
        );

        let mut frames = 0;
        while frames < MAX_FRAMES {
            match game.phase() {
                GamePhase::GameOver => break,
                GamePhase::LevelComplete => game.command(HostCommand::AdvanceLevel),
                GamePhase::Playing => {}
            }
            let input = autopilot(game.state());
            game.set_input(input);
            game.frame(frames as f64 * FRAME_MS);
            frames += 1;
        }

        let state = game.state();
        log::info!(
            "Session ended after {} frames: phase {:?}, level {}, score {}, high {}, lives {}",
            frames,
            state.phase,
            state.level,
            state.scores.score,
            state.scores.high_score,
            state.lives
        );
        println!(
            "level {} | score {} | high score {} | lives {}",
            state.level, state.scores.score, state.scores.high_score, state.lives
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
