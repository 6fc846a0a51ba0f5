//! Error types shared across the crate.
//!
//! None of these are fatal to the page: fetch failures become visible game
//! state, storage failures degrade to in-memory tallies, and only a bad
//! configuration is handed back to the JS caller.

use thiserror::Error;

/// Failures while retrieving a creature from the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, CORS, offline, aborted).
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not the JSON shape we expect.
    #[error("malformed creature payload: {0}")]
    Parse(String),

    /// Payload parsed but carries no official artwork URL.
    #[error("creature {0} has no artwork")]
    MissingArtwork(u32),

    /// No entropy source available to pick a creature.
    #[error("random source unavailable: {0}")]
    Entropy(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

/// Failures of the persistent key-value slot holding the score tally.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage backend exists in this environment (private mode, sandboxed iframe).
    #[error("persistent storage unavailable")]
    Unavailable,

    /// The backend refused the read or write (quota, security error).
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Tally could not be encoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Invalid game configuration supplied by the host page.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
