//! Noise-tolerant matching of OCR text against known menu labels.
//!
//! Distance is a weighted Levenshtein: insertions and deletions cost 1, a
//! substitution costs 0 for identical characters, 0.1 for characters listed
//! in the [`CharacterEquivalenceTable`] and 1 otherwise.

use std::sync::Arc;

use crate::equivalence::CharacterEquivalenceTable;
use crate::labels::OrderedLabelList;

pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Matched {
        label: String,
        index: usize,
        score: f64,
    },
    /// Nothing scored above the threshold
    NoMatch { best_score: f64 },
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    /// `(label, index)` of a match
    pub fn matched(&self) -> Option<(&str, usize)> {
        match self {
            MatchResult::Matched { label, index, .. } => Some((label, *index)),
            MatchResult::NoMatch { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    table: Arc<CharacterEquivalenceTable>,
    threshold: f64,
}

impl FuzzyMatcher {
    pub fn new(table: Arc<CharacterEquivalenceTable>, threshold: f64) -> Self {
        Self { table, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn table(&self) -> &CharacterEquivalenceTable {
        &self.table
    }

    /// Best candidate for `raw_text`, compared case-insensitively.
    ///
    /// Ties keep the first candidate in list order. A match needs a similarity
    /// strictly greater than the threshold.
    pub fn find_match(&self, raw_text: &str, candidates: &OrderedLabelList) -> MatchResult {
        let text = raw_text.to_lowercase();

        let mut best: Option<(usize, f64)> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            let score = self.similarity(&text, &candidate.to_lowercase());
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, score)) if score > self.threshold => MatchResult::Matched {
                label: candidates.get(index).unwrap_or_default().to_string(),
                index,
                score,
            },
            Some((_, score)) => MatchResult::NoMatch { best_score: score },
            None => MatchResult::NoMatch { best_score: 0.0 },
        }
    }

    /// `1 - distance / max(len)`; two empty strings are identical
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 1.0;
        }
        1.0 - self.weighted_distance(a, b) / max_len as f64
    }

    pub fn weighted_distance(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut previous: Vec<f64> = (0..=b.len()).map(|j| j as f64).collect();
        let mut current = vec![0.0; b.len() + 1];

        for (i, &ca) in a.iter().enumerate() {
            current[0] = (i + 1) as f64;
            for (j, &cb) in b.iter().enumerate() {
                let deletion = previous[j + 1] + 1.0;
                let insertion = current[j] + 1.0;
                let substitution = previous[j] + self.table.substitution_cost(ca, cb);
                current[j + 1] = deletion.min(insertion).min(substitution);
            }
            std::mem::swap(&mut previous, &mut current);
        }

        previous[b.len()]
    }
}
