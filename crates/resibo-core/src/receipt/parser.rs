//! Receipt parser: normalization, filtering and the layout cascade.

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::receipt::ExtractionResult;

use super::aggregate::Aggregator;
use super::cascade::Cascade;
use super::filter::LineFilter;
use super::normalize::{normalize_text, NormalizedLine};
use super::ReceiptExtractor;

/// Extracts line items from one receipt's recognized text.
///
/// The parser holds configuration only; every call to [`ReceiptParser::extract`]
/// is independent and pure.
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    filter: LineFilter,
    cascade: Cascade,
}

impl ReceiptParser {
    /// Create a parser with the default filter settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from the extraction section of the configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_min_line_length(config.min_line_length)
            .with_skip_keywords(&config.skip_keywords)
    }

    /// Set the minimum candidate line length.
    pub fn with_min_line_length(mut self, min_length: usize) -> Self {
        self.filter = self.filter.with_min_length(min_length);
        self
    }

    /// Set the keywords that mark non-item lines.
    pub fn with_skip_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filter = self.filter.with_skip_keywords(keywords);
        self
    }

    /// Extract line items and their total from raw OCR text.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let lines = normalize_text(text);
        let normalized_text = lines
            .iter()
            .map(|l| l.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let mut aggregator = Aggregator::new();
        let candidates: Vec<NormalizedLine> = lines
            .into_iter()
            .filter(|line| {
                let keep = self.filter.is_candidate(line);
                if !keep {
                    aggregator.record_filtered();
                }
                keep
            })
            .collect();

        let mut i = 0;
        while i < candidates.len() {
            match self.cascade.match_at(&candidates, i) {
                Some(m) => {
                    debug!(
                        "Line {} matched {} ({})",
                        candidates[i].source_index,
                        m.layout.shape(),
                        m.item.name
                    );
                    aggregator.push(m.item, &candidates[i].content);
                    i += m.consumed;
                }
                None => {
                    debug!("Skipped line (no match): {}", candidates[i].content);
                    aggregator.record_unmatched(&candidates[i].content);
                    i += 1;
                }
            }
        }

        let result = aggregator.finish(normalized_text);

        info!(
            "Extracted {} items totalling {} ({} lines filtered, {} unmatched)",
            result.items.len(),
            result.total,
            result.filtered_lines,
            result.unmatched_lines.len()
        );

        result
    }
}

impl ReceiptExtractor for ReceiptParser {
    fn extract_from_text(&self, text: &str) -> ExtractionResult {
        self.extract(text)
    }
}
