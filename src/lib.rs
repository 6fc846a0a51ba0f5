//! Creature Guess core crate.
//!
//! A random creature is fetched from a public species API and shown as a
//! silhouette; the player types its name, the picture is revealed and the
//! correct / wrong tally is kept in `localStorage`. Game rules live in
//! [`game`] and [`view`] and are plain Rust so they test natively; the `dom`
//! shell and [`client`] are the browser-facing edges.

use wasm_bindgen::prelude::*;

pub mod client;
pub mod config;
pub mod creature;
mod dom;
pub mod error;
pub mod game;
mod logging;
pub mod score;
pub mod view;

pub use config::GameConfig;
pub use creature::{normalize_guess, Creature};
pub use error::{ConfigError, FetchError, StorageError};
pub use game::{FetchStatus, FetchTicket, Game, GuessOutcome, RoundStart, RoundState};
pub use score::{BrowserStorage, KeyValue, MemoryBackend, ScoreStore, ScoreTally};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
}

/// Mount the game into the page. `config_json` may override any
/// [`GameConfig`] field, e.g. `{"track_score": false}`.
#[wasm_bindgen]
pub fn start_game(config_json: Option<String>) -> Result<(), JsValue> {
    let config = GameConfig::from_json(config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    dom::start(config)
}
