use std::collections::{BTreeMap, HashMap, HashSet};

/// Cost of substituting two characters the OCR engine is known to confuse
pub const EQUIVALENT_SUBSTITUTION_COST: f64 = 0.1;

/// Characters the OCR engine confuses with each other.
///
/// Entries are stored lower-cased because matching runs on lower-cased text.
/// Lookups are symmetric: an entry `o -> [0]` also makes `0` equivalent to `o`.
#[derive(Debug, Clone, Default)]
pub struct CharacterEquivalenceTable {
    map: HashMap<char, HashSet<char>>,
}

impl CharacterEquivalenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `character_equivalences` config section.
    ///
    /// Keys must be a single character; every character of every value string
    /// is taken as an equivalent.
    pub fn from_config(entries: &BTreeMap<String, Vec<String>>) -> Self {
        let mut table = Self::new();

        for (key, values) in entries {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                tracing::warn!("Ignoring equivalence key '{}': expected one character", key);
                continue;
            };

            for other in values.iter().flat_map(|v| v.chars()) {
                table.insert(c, other);
            }
        }

        tracing::debug!("Loaded {} character equivalences", table.map.len());
        table
    }

    pub fn insert(&mut self, c: char, equivalent: char) {
        for lower in c.to_lowercase() {
            self.map
                .entry(lower)
                .or_default()
                .extend(equivalent.to_lowercase());
        }
    }

    pub fn are_equivalent(&self, a: char, b: char) -> bool {
        let listed = |x: char, y: char| self.map.get(&x).is_some_and(|set| set.contains(&y));
        listed(a, b) || listed(b, a)
    }

    pub fn substitution_cost(&self, a: char, b: char) -> f64 {
        if a == b {
            0.0
        } else if self.are_equivalent(a, b) {
            EQUIVALENT_SUBSTITUTION_COST
        } else {
            1.0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
