use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ReferenceError;
use crate::index::ReferenceIndex;
use crate::types::BannedIngredient;

const BUNDLED_YAML: &str = include_str!("../data/banned_ingredients.yaml");

#[derive(Debug, Deserialize)]
struct ReferenceDocument {
    #[serde(default = "ReferenceDocument::default_version")]
    version: u32,
    ingredients: Vec<BannedIngredient>,
}

impl ReferenceDocument {
    fn default_version() -> u32 {
        1
    }
}

/// Parses a reference list document (`version` + `ingredients`).
pub fn load_entries_from_str(yaml: &str) -> Result<Vec<BannedIngredient>, ReferenceError> {
    let document: ReferenceDocument = serde_yaml::from_str(yaml)?;
    tracing::debug!(
        version = document.version,
        entries = document.ingredients.len(),
        "parsed reference list"
    );
    Ok(document.ingredients)
}

/// Reads and parses a reference list document from disk.
pub fn load_entries_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<BannedIngredient>, ReferenceError> {
    let content = fs::read_to_string(path)?;
    load_entries_from_str(&content)
}

/// The reference list compiled into this crate.
pub fn bundled_entries() -> Result<Vec<BannedIngredient>, ReferenceError> {
    load_entries_from_str(BUNDLED_YAML)
}

/// Index over [`bundled_entries`].
pub fn bundled_index() -> Result<ReferenceIndex, ReferenceError> {
    ReferenceIndex::build(bundled_entries()?)
}
