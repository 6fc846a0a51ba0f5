//! Persistent Score Store.
//!
//! The tally lives in a single key-value slot. The slot itself is abstracted
//! behind [`KeyValue`] so the controller can run against browser
//! `localStorage`, an in-memory map (tests, degraded mode), or anything else
//! durable. Every failure path falls back to the caller's default; losing the
//! tally between sessions is the worst case.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Correct / incorrect counters. Serialized as `{"correct": n, "incorrect": n}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    pub correct: u32,
    pub incorrect: u32,
}

impl ScoreTally {
    pub fn new(correct: u32, incorrect: u32) -> Self {
        Self { correct, incorrect }
    }

    /// Bump exactly one counter.
    pub fn record(&mut self, was_correct: bool) {
        if was_correct {
            self.correct = self.correct.saturating_add(1);
        } else {
            self.incorrect = self.incorrect.saturating_add(1);
        }
    }

    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }
}

// --- Backends ----------------------------------------------------------------

/// Raw string slot storage.
pub trait KeyValue {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-lifetime map. Used in tests and whenever the browser offers no storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    slots: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`. Holds `None` when the environment has no storage
/// (or accessing it throws), in which case every call reports `Unavailable`.
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable; score will not survive a reload");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }
}

impl Default for BrowserStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValue for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

// --- Store -------------------------------------------------------------------

/// JSON-encoded tally on top of any [`KeyValue`] backend.
pub struct ScoreStore {
    backend: Box<dyn KeyValue>,
}

impl ScoreStore {
    pub fn new(backend: impl KeyValue + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Stored tally for `key`, or `default` when absent, unreadable or malformed.
    pub fn load(&self, key: &str, default: ScoreTally) -> ScoreTally {
        match self.backend.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("discarding malformed tally under '{}': {}", key, e);
                default
            }),
            Ok(None) => default,
            Err(e) => {
                warn!("reading tally '{}' failed: {}", key, e);
                default
            }
        }
    }

    /// Overwrite the slot for `key`.
    pub fn save(&mut self, key: &str, tally: &ScoreTally) -> Result<(), StorageError> {
        let raw = serde_json::to_string(tally)?;
        self.backend.set(key, &raw)
    }
}
