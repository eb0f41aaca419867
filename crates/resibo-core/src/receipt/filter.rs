//! Pre-pass that drops lines which cannot be purchasable items.

use super::normalize::NormalizedLine;

/// Summary, tax and payment markers that never start an item.
pub const DEFAULT_SKIP_KEYWORDS: [&str; 5] = ["total", "vat", "sales", "exempt", "change"];

/// Lines shorter than this are treated as OCR noise.
pub const DEFAULT_MIN_LINE_LENGTH: usize = 5;

/// Rejects receipt summary lines and short fragments.
#[derive(Debug, Clone)]
pub struct LineFilter {
    min_length: usize,
    skip_keywords: Vec<String>,
}

impl LineFilter {
    pub fn new() -> Self {
        Self {
            min_length: DEFAULT_MIN_LINE_LENGTH,
            skip_keywords: DEFAULT_SKIP_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Set the minimum line length in characters.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Replace the skip keyword list. Keywords are matched lowercase.
    pub fn with_skip_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skip_keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    pub fn skip_keywords(&self) -> &[String] {
        &self.skip_keywords
    }

    /// Whether the line may hold (or start) a line item.
    pub fn is_candidate(&self, line: &NormalizedLine) -> bool {
        if line.len() < self.min_length {
            return false;
        }

        !self
            .skip_keywords
            .iter()
            .any(|keyword| line.content.contains(keyword.as_str()))
    }
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::new()
    }
}
