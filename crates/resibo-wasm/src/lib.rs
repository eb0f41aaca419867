//! WASM bindings for receipt OCR line item extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Recognition happens on the JavaScript side; the recognized text is handed
//! to these functions for extraction.

use wasm_bindgen::prelude::*;

use resibo_core::receipt::normalize_text;
use resibo_core::receipt::rules::{parse_amount, DEFAULT_CURRENCY_SYMBOL};
use resibo_core::{ExtractionResult, ReceiptParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(result: &ExtractionResult) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract line items and the total from recognized receipt text.
#[wasm_bindgen]
pub fn extract_receipt_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&ReceiptParser::new().extract(text))
}

/// Normalize recognized text into canonical receipt lines.
#[wasm_bindgen]
pub fn normalize_receipt_text(text: &str) -> Vec<String> {
    normalize_text(text).into_iter().map(|l| l.content).collect()
}

/// Format an amount string (e.g. "95,5" or "₱95.50") for display.
#[wasm_bindgen]
pub fn format_amount(amount: &str) -> Result<String, JsValue> {
    let value = parse_amount(amount).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(resibo_core::receipt::rules::format_amount(
        value,
        DEFAULT_CURRENCY_SYMBOL,
    ))
}

/// Receipt extractor class for browser use.
#[wasm_bindgen]
pub struct ReceiptExtractor {
    parser: ReceiptParser,
}

#[wasm_bindgen]
impl ReceiptExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: ReceiptParser::new(),
        }
    }

    /// Change the minimum candidate line length.
    #[wasm_bindgen]
    pub fn set_min_line_length(&mut self, min_length: usize) {
        self.parser = self.parser.clone().with_min_line_length(min_length);
    }

    /// Extract line items from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.extract(text))
    }

    /// Extract and return the result as a JSON string.
    #[wasm_bindgen]
    pub fn extract_json(&self, text: &str) -> Result<String, JsValue> {
        serde_json::to_string(&self.parser.extract(text))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for ReceiptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_normalize_receipt_text() {
        let lines = normalize_receipt_text("  FRESH   MILK  ₱95.50 \n\n#*!\nBREAD 25,00");
        assert_eq!(lines, vec!["fresh milk ₱95.50", "bread 25.00"]);
    }

    #[wasm_bindgen_test]
    fn test_format_amount() {
        assert_eq!(format_amount("95,5").unwrap(), "₱95.50");
        assert_eq!(format_amount("₱1200").unwrap(), "₱1200.00");
    }

    #[wasm_bindgen_test]
    fn test_extract_json() {
        let extractor = ReceiptExtractor::new();
        let json = extractor.extract_json("milk 45.50\n2 coke 50.00").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
        assert_eq!(value["total"], "95.50");
    }

    #[wasm_bindgen_test]
    fn test_min_line_length() {
        let mut extractor = ReceiptExtractor::new();
        extractor.set_min_line_length(20);
        let json = extractor.extract_json("milk 45.50").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["items"].as_array().unwrap().is_empty());
        assert_eq!(value["filtered_lines"], 1);
    }
}
