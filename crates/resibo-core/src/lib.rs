//! Core library for receipt OCR processing.
//!
//! This crate provides:
//! - Normalization of noisy OCR text into canonical receipt lines
//! - A priority-ordered cascade of receipt layouts for line item extraction
//! - Receipt data models and persistence payloads
//! - The recognition seam used to plug in an external OCR capability

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;

pub use error::{ExtractionError, OcrError, ResiboError, Result};
pub use models::config::ResiboConfig;
pub use models::receipt::{ExtractionResult, LineItem, ReceiptItemRow, ReceiptRecord};
pub use ocr::{ReceiptScanner, Recognition, StaticRecognizer, TextRecognizer};
pub use receipt::{Layout, NormalizedLine, ReceiptExtractor, ReceiptParser};
