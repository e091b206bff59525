use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Known OCR confusions, keyed by the character the engine should have read.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OcrCorrections {
    pub character_equivalences: BTreeMap<String, Vec<String>>,
    /// Glyphs the engine emits in place of a `/` at the edges of team names
    pub slash_like_characters: Vec<String>,
}

impl OcrCorrections {
    pub fn slash_like_chars(&self) -> Vec<char> {
        self.slash_like_characters
            .iter()
            .flat_map(|s| s.chars())
            .collect()
    }
}
