//! Browser binding
//!
//! JS owns the canvas, the key listeners and `requestAnimationFrame`; it
//! calls into `WebGame` once per frame and paints from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::game::Game;
use crate::input::{HostCommand, TickInput};
use crate::persistence::LocalStorageStore;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Sky Volley starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game, optionally overriding balance with a tuning JSON string
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebGame {
        let tuning = tuning_json
            .and_then(|json| match Tuning::from_json(&json) {
                Ok(t) => Some(t),
                Err(e) => {
                    log::warn!("Bad tuning JSON, using defaults: {}", e);
                    None
                }
            })
            .unwrap_or_default();
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            game: Game::new(
                seed,
                tuning,
                Box::new(LocalStorageStore::default()),
                Box::new(WebAudio::new()),
            ),
            input: TickInput::default(),
        }
    }

    /// `requestAnimationFrame` callback
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.game.set_input(self.input);
        self.game.frame(timestamp_ms);
    }

    pub fn set_keys(&mut self, left: bool, right: bool, up: bool, down: bool, fire: bool) {
        self.input = TickInput {
            left,
            right,
            up,
            down,
            fire,
        };
    }

    /// Drop all held keys (window blur)
    pub fn release_keys(&mut self) {
        self.input = TickInput::default();
    }

    pub fn advance_level(&mut self) {
        self.game.command(HostCommand::AdvanceLevel);
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.game.command(HostCommand::ToggleMute);
        !self.game.audio().is_muted()
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.game.command(HostCommand::SetVolume(volume));
    }

    /// Current frame as JSON for the canvas painter
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|e| {
            log::warn!("Snapshot encoding failed: {}", e);
            String::from("null")
        })
    }
}
