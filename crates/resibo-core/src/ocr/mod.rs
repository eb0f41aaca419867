//! Seam to the external text recognition capability.
//!
//! Recognition itself happens outside this crate. A [`TextRecognizer`] turns
//! an image into plain text; [`ReceiptScanner`] awaits it and hands the text
//! to a [`ReceiptExtractor`].

use std::future::Future;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::OcrError;
use crate::models::receipt::ExtractionResult;
use crate::receipt::{ReceiptExtractor, ReceiptParser};

/// Text produced by a recognizer for one image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognition {
    /// Full recognized text.
    pub text: String,
}

impl Recognition {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An external OCR capability.
pub trait TextRecognizer {
    /// Recognize the text in the image at `image`.
    fn recognize(&self, image: &Path) -> impl Future<Output = Result<Recognition, OcrError>> + Send;
}

/// Recognizer that returns a preset outcome, for text that was recognized
/// elsewhere.
#[derive(Debug, Clone)]
pub struct StaticRecognizer {
    outcome: Result<String, String>,
}

impl StaticRecognizer {
    /// Always recognize `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
        }
    }

    /// Always fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }
}

impl TextRecognizer for StaticRecognizer {
    async fn recognize(&self, _image: &Path) -> Result<Recognition, OcrError> {
        match &self.outcome {
            Ok(text) => Ok(Recognition::new(text.clone())),
            Err(reason) => Err(OcrError::Recognition(reason.clone())),
        }
    }
}

/// Runs recognition and extraction for one receipt image at a time.
pub struct ReceiptScanner<R, E = ReceiptParser> {
    recognizer: R,
    extractor: E,
}

impl<R: TextRecognizer> ReceiptScanner<R> {
    /// Create a scanner with the default parser.
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            extractor: ReceiptParser::new(),
        }
    }
}

impl<R: TextRecognizer, E: ReceiptExtractor> ReceiptScanner<R, E> {
    /// Use a different extractor.
    pub fn with_extractor<E2: ReceiptExtractor>(self, extractor: E2) -> ReceiptScanner<R, E2> {
        ReceiptScanner {
            recognizer: self.recognizer,
            extractor,
        }
    }

    /// Recognize and extract one receipt.
    ///
    /// A recognition failure is returned as the single error for the image;
    /// no items are produced for it. Recognized text with no matching lines
    /// gives an empty [`ExtractionResult`] instead.
    pub async fn scan(&self, image: &Path) -> Result<ExtractionResult, OcrError> {
        let recognition = match self.recognizer.recognize(image).await {
            Ok(recognition) => recognition,
            Err(e) => {
                warn!("Recognition failed for {}: {}", image.display(), e);
                return Err(e);
            }
        };

        info!(
            "Recognized {} characters from {}",
            recognition.text.chars().count(),
            image.display()
        );

        Ok(self.extractor.extract(&recognition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_scan_extracts_items() {
        let scanner = ReceiptScanner::new(StaticRecognizer::new("MILK 45.50\nBREAD 25.00\nTOTAL 70.50"));
        let result = scanner.scan(Path::new("receipt.jpg")).await.unwrap();

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total, Decimal::from_str("70.50").unwrap());
    }

    #[tokio::test]
    async fn test_recognition_failure_is_distinct_from_no_items() {
        let failing = ReceiptScanner::new(StaticRecognizer::failing("engine crashed"));
        let err = failing.scan(Path::new("receipt.jpg")).await.unwrap_err();
        assert!(matches!(err, OcrError::Recognition(ref msg) if msg == "engine crashed"));

        let blank = ReceiptScanner::new(StaticRecognizer::new(""));
        let result = blank.scan(Path::new("receipt.jpg")).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_custom_extractor() {
        let scanner = ReceiptScanner::new(StaticRecognizer::new("tea 5.00"))
            .with_extractor(ReceiptParser::new().with_min_line_length(10));
        let result = scanner.scan(Path::new("receipt.jpg")).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(result.filtered_lines, 1);
    }
}
