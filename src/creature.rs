//! Creature entity, the upstream payload it is built from, and guess normalization.

use serde::Deserialize;

use crate::error::FetchError;

/// The thing being guessed. Replaced wholesale each round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Creature {
    pub id: u32,
    /// Lowercased display name as served upstream (may contain `-`).
    pub name: String,
    pub image: String,
}

impl Creature {
    pub fn new(id: u32, name: &str, image: &str) -> Self {
        Self {
            id,
            name: name.to_lowercase(),
            image: image.to_string(),
        }
    }

    /// Name reduced the same way a guess is, so `mr-mime` matches "Mr. Mime".
    /// Digits are dropped from both sides too: `porygon2` also accepts "porygon".
    pub fn answer_key(&self) -> String {
        normalize_guess(&self.name)
    }

    /// Exact comparison after normalizing both sides.
    pub fn is_named(&self, guess: &str) -> bool {
        normalize_guess(guess) == self.answer_key()
    }

    /// Build from the JSON body of a species lookup.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        let payload: CreaturePayload = serde_json::from_str(body)?;
        payload.try_into()
    }
}

// --- Upstream payload --------------------------------------------------------

/// Subset of the species endpoint response we read.
#[derive(Debug, Deserialize)]
pub struct CreaturePayload {
    pub id: u32,
    pub name: String,
    pub sprites: Sprites,
}

#[derive(Debug, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Artwork,
}

#[derive(Debug, Default, Deserialize)]
pub struct Artwork {
    pub front_default: Option<String>,
}

impl TryFrom<CreaturePayload> for Creature {
    type Error = FetchError;

    fn try_from(p: CreaturePayload) -> Result<Self, Self::Error> {
        let image = p
            .sprites
            .other
            .official_artwork
            .front_default
            .filter(|url| !url.is_empty())
            .ok_or(FetchError::MissingArtwork(p.id))?;
        Ok(Creature::new(p.id, &p.name, &image))
    }
}

// --- Guess handling ----------------------------------------------------------

/// Drop everything that is not an ASCII letter, lowercase the rest.
pub fn normalize_guess(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// --- Random selection --------------------------------------------------------

/// Map raw entropy onto `1..=catalog_size`. A zero-sized catalog maps to 1.
pub fn creature_id_from_entropy(entropy: u32, catalog_size: u32) -> u32 {
    if catalog_size == 0 {
        return 1;
    }
    entropy % catalog_size + 1
}

/// Pick a creature id uniformly enough for a guessing game (modulo bias is
/// negligible for catalogs this small).
pub fn random_creature_id(catalog_size: u32) -> Result<u32, FetchError> {
    let mut buf = [0u8; 4];
    getrandom::getrandom(&mut buf).map_err(|e| FetchError::Entropy(e.to_string()))?;
    Ok(creature_id_from_entropy(u32::from_le_bytes(buf), catalog_size))
}
