//! Error types for the resibo-core library.

use thiserror::Error;

/// Main error type for the resibo library.
#[derive(Error, Debug)]
pub enum ResiboError {
    /// Text recognition error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Line item extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the external recognition capability.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The recognizer ran but could not produce text.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// The recognizer could not be started at all.
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),

    /// The image input is missing or unusable.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to line item extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Field validation failed.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Failed to parse a value.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },

    /// No line items could be extracted.
    #[error("no line items found")]
    NoData,
}

impl ExtractionError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for the resibo library.
pub type Result<T> = std::result::Result<T, ResiboError>;
