//! Game configuration handed in by the host page as an optional JSON string.
//!
//! The flags collapse the incremental app versions into a single controller:
//! the plain guessing round (`GameConfig::basic()`) and the full game with a
//! persisted tally and input focus management (`GameConfig::default()`).

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_KEY: &str = "guess-results";
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2/pokemon";
/// First-generation catalog; ids above this exist upstream but have patchier artwork.
pub const DEFAULT_CATALOG_SIZE: u32 = 151;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Count correct / incorrect guesses and persist them.
    pub track_score: bool,
    /// Give the guess input focus whenever a round starts.
    pub focus_input: bool,
    pub storage_key: String,
    pub api_base: String,
    pub catalog_size: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            track_score: true,
            focus_input: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            catalog_size: DEFAULT_CATALOG_SIZE,
        }
    }
}

impl GameConfig {
    /// Guess-and-reveal only: no tally, no focus handling.
    pub fn basic() -> Self {
        Self {
            track_score: false,
            focus_input: false,
            ..Self::default()
        }
    }

    /// Parse the page-supplied JSON. `None` or a blank string yields the defaults;
    /// missing fields fall back individually.
    pub fn from_json(raw: Option<&str>) -> Result<Self, ConfigError> {
        let cfg: GameConfig = match raw.map(str::trim) {
            None | Some("") => GameConfig::default(),
            Some(text) => serde_json::from_str(text)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog_size == 0 {
            return Err(ConfigError::Invalid("catalog_size must be at least 1"));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty"));
        }
        if self.api_base.is_empty() {
            return Err(ConfigError::Invalid("api_base must not be empty"));
        }
        Ok(())
    }
}
