//! Embedded seed set used by the destructive restore.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// One tip as it appears in the embedded seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTip {
    pub tip: String,
    pub url: String,
    pub category: String,
}

const SEED_JSON: &str = include_str!("seed_tips.json");

/// Parse the embedded seed set.
pub fn seed_tips() -> Result<Vec<SeedTip>, StorageError> {
    serde_json::from_str(SEED_JSON)
        .map_err(|e| StorageError::Seed(format!("embedded seed set is malformed: {e}")))
}
