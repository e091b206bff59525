use unicode_normalization::UnicodeNormalization;

/// OCR text cleanup applied before matching
pub trait TextCleanup: Send + Sync {
    // Default rules: trim, NFKC (full-width glyphs from the ja model), no line breaks
    fn clean(&self, raw: &str) -> String {
        let text = raw.trim();

        if text.is_empty() {
            return String::new();
        }

        let text: String = text.nfkc().collect();
        text.replace(['\n', '\r'], "").trim().to_string()
    }
}

pub struct LeagueCleanup;
impl TextCleanup for LeagueCleanup {}

/// Team names are framed by slashes on screen, which the OCR engine often
/// misreads as `|`, `l`, `1` and similar glyphs.
#[derive(Debug, Clone, Default)]
pub struct TeamCleanup {
    slash_like: Vec<char>,
}

impl TeamCleanup {
    pub fn new(slash_like: Vec<char>) -> Self {
        Self { slash_like }
    }
}

impl TextCleanup for TeamCleanup {
    fn clean(&self, raw: &str) -> String {
        let text = LeagueCleanup.clean(raw).to_lowercase();
        let mut chars: Vec<char> = text.chars().collect();

        if !self.slash_like.is_empty() && chars.len() > 1 {
            if self.slash_like.contains(&chars[0]) {
                chars[0] = '/';
            }
            let last = chars.len() - 1;
            if self.slash_like.contains(&chars[last]) {
                chars[last] = '/';
            }
        }

        if chars.first() == Some(&'/') && chars.last() == Some(&'/') {
            chars.remove(0);
            chars.pop();
        }

        chars.into_iter().collect()
    }
}

/// On-screen label of a teams file name: `/Name/` is shown as `Name`.
///
/// Only a slash on both ends is a wrapper; `/Name` keeps its slash.
pub fn team_label(name: &str) -> &str {
    name.strip_prefix('/')
        .and_then(|n| n.strip_suffix('/'))
        .unwrap_or(name)
}
