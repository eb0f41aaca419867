//! Configuration structures for receipt extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ResiboError, Result};
use crate::receipt::{DEFAULT_MIN_LINE_LENGTH, DEFAULT_SKIP_KEYWORDS};
use crate::receipt::rules::DEFAULT_CURRENCY_SYMBOL;

/// Main configuration for resibo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResiboConfig {
    /// Line item extraction configuration.
    pub extraction: ExtractionConfig,

    /// External OCR command configuration.
    pub ocr: OcrConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Line item extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines shorter than this (in characters) are ignored.
    pub min_line_length: usize,

    /// Lines containing any of these are never items.
    pub skip_keywords: Vec<String>,

    /// Currency symbol used when displaying amounts.
    pub currency_symbol: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_line_length: DEFAULT_MIN_LINE_LENGTH,
            skip_keywords: DEFAULT_SKIP_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// External OCR command configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Executable that prints recognized text to stdout.
    pub command: String,

    /// Recognition language passed to the command.
    pub language: String,

    /// Extra arguments appended after the standard ones.
    pub extra_args: Vec<String>,

    /// Seconds to wait for recognition before giving up.
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
            extra_args: Vec::new(),
            timeout_secs: 60,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format used when none is given (json, csv or text).
    pub default_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_string(),
        }
    }
}

impl ResiboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ResiboError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ResiboError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
