//! Normalization of raw OCR text into canonical receipt lines.

use serde::{Deserialize, Serialize};

use super::rules::{ANY_WHITESPACE, DEFAULT_CURRENCY_SYMBOL, WHITESPACE_RUN};

/// One cleaned, non-empty line of receipt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedLine {
    /// Cleaned line content.
    pub content: String,
    /// Zero-based position of the line in the raw text.
    pub source_index: usize,
}

impl NormalizedLine {
    pub fn new(content: impl Into<String>, source_index: usize) -> Self {
        Self {
            content: content.into(),
            source_index,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Normalize every physical line of `text`, dropping lines that end up empty.
pub fn normalize_text(text: &str) -> Vec<NormalizedLine> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| normalize_line(raw).map(|content| NormalizedLine::new(content, index)))
        .collect()
}

/// Normalize a single physical line.
///
/// Returns `None` when nothing survives cleaning.
pub fn normalize_line(raw: &str) -> Option<String> {
    let line = raw.trim().to_lowercase();
    if line.is_empty() {
        return None;
    }

    // Confusable correction runs after lowercasing, so it only ever sees
    // characters that survived case folding.
    let line = line.replace('O', "0").replace('S', "5");
    let line = line.replace(',', ".");
    let line = WHITESPACE_RUN.replace_all(&line, " ");
    let line: String = line.chars().filter(|c| is_allowed(*c)).collect();

    // Stripping can leave gaps or edge whitespace behind.
    let line = ANY_WHITESPACE.replace_all(&line, " ");
    let line = line.trim();

    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '.' | ':' | '/' | '-' | '@')
        || DEFAULT_CURRENCY_SYMBOL.contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_basic_cleanup() {
        assert_eq!(normalize_line("  MILK   45,50  "), Some("milk 45.50".to_string()));
        assert_eq!(normalize_line("Coke* (1.5L)  ₱65.00"), Some("coke 1.5l ₱65.00".to_string()));
        assert_eq!(normalize_line("a=b#c"), Some("abc".to_string()));
        assert_eq!(normalize_line("   "), None);
        assert_eq!(normalize_line("***"), None);
    }

    #[test]
    fn test_normalize_keeps_allowed_punctuation() {
        assert_eq!(
            normalize_line("Date: 01/02/2024 - 2@15.00"),
            Some("date: 01/02/2024 - 2@15.00".to_string())
        );
    }

    #[test]
    fn test_normalize_text_preserves_source_index() {
        let lines = normalize_text("MILK 45.50\n\n   \nBREAD 25.00\r\n");
        assert_eq!(
            lines,
            vec![
                NormalizedLine::new("milk 45.50", 0),
                NormalizedLine::new("bread 25.00", 3),
            ]
        );
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize_text("").is_empty());
        assert!(normalize_text(" \n\t\n").is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = "  SOAP  Bar *2  \n2 x 15,00\n\tTOTAL:   ₱30.00 \nx@y  -- z";
        let once: Vec<String> = normalize_text(raw).into_iter().map(|l| l.content).collect();
        let twice: Vec<String> = normalize_text(&once.join("\n"))
            .into_iter()
            .map(|l| l.content)
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_does_not_rewrite_folded_letters() {
        assert_eq!(normalize_line("SOAP 12.00"), Some("soap 12.00".to_string()));
    }
}
