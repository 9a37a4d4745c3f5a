//! Browser bridge
//!
//! The renderer, input handling and HUD live in JavaScript. They drive the
//! simulation through this handle: one `tick()` per animation step, heading
//! changes from the keyboard, and a JSON snapshot to draw from.

use wasm_bindgen::prelude::*;

use crate::sim::{Direction, GameState, tick};
use crate::tuning::SimConfig;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Paper Territory core loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
}

#[wasm_bindgen]
impl WebGame {
    /// New match seeded from the clock, optionally with a JSON tuning blob
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let config = match config_json.as_deref().map(SimConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Bad config JSON ({e}), using defaults");
                SimConfig::default()
            }
            None => SimConfig::default(),
        };
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            state: GameState::with_config(seed, config),
        }
    }

    pub fn tick(&mut self) {
        tick(&mut self.state);
    }

    /// Accepts "up"/"down"/"left"/"right" or DOM key names like "ArrowUp"
    pub fn set_heading(&mut self, key: &str) -> bool {
        match Direction::from_str(key) {
            Some(dir) => self.state.set_player_heading(dir),
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn abandon(&mut self) {
        self.state.abandon();
    }

    pub fn is_match_over(&self) -> bool {
        self.state.is_match_over()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {e}");
            String::from("null")
        })
    }

    pub fn events_json(&self) -> String {
        serde_json::to_string(&self.state.events).unwrap_or_else(|_| String::from("[]"))
    }
}
