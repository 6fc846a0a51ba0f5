//! Remote Data Client: one GET per round against the species endpoint.
//!
//! No retry here; the game controller turns a failure into a visible state
//! with its own retry action.

use gloo_net::http::Request;
use log::debug;

use crate::config::GameConfig;
use crate::creature::{random_creature_id, Creature};
use crate::error::FetchError;

/// `{base}/{id}` with any trailing slash on the base collapsed.
pub fn creature_url(api_base: &str, id: u32) -> String {
    format!("{}/{}", api_base.trim_end_matches('/'), id)
}

/// Fetch a single creature by id.
pub async fn fetch_creature(api_base: &str, id: u32) -> Result<Creature, FetchError> {
    let url = creature_url(api_base, id);
    debug!("fetching creature {} from {}", id, url);
    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }
    let body = resp
        .text()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    Creature::from_json(&body)
}

/// Pick an id inside the configured catalog and fetch it.
pub async fn fetch_random_creature(config: &GameConfig) -> Result<Creature, FetchError> {
    let id = random_creature_id(config.catalog_size)?;
    fetch_creature(&config.api_base, id).await
}
