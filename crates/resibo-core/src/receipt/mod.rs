//! Receipt line item extraction module.

mod aggregate;
mod cascade;
mod filter;
mod normalize;
mod parser;
pub mod rules;

pub use aggregate::Aggregator;
pub use cascade::{Cascade, CascadeMatch, Layout};
pub use filter::{LineFilter, DEFAULT_MIN_LINE_LENGTH, DEFAULT_SKIP_KEYWORDS};
pub use normalize::{normalize_line, normalize_text, NormalizedLine};
pub use parser::ReceiptParser;

use crate::models::receipt::ExtractionResult;
use crate::ocr::Recognition;

/// Trait for receipt line item extractors.
pub trait ReceiptExtractor {
    /// Extract line items from plain recognized text.
    fn extract_from_text(&self, text: &str) -> ExtractionResult;

    /// Extract line items from a recognition result.
    fn extract(&self, recognition: &Recognition) -> ExtractionResult {
        self.extract_from_text(&recognition.text)
    }
}
