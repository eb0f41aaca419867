//! Receipt data models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::receipt::rules::compute_amount;
use crate::receipt::Layout;

/// A single purchased item read from a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name as printed (normalized).
    pub name: String,

    /// Quantity purchased.
    pub quantity: Decimal,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Extended amount for the line.
    pub amount: Decimal,

    /// Layout that produced this item (absent for manual entries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    /// Zero-based raw text line the item starts on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<usize>,
}

impl LineItem {
    /// Build an item entered by hand, computing its amount.
    pub fn manual(
        name: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<Self, ExtractionError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ExtractionError::validation("name", "must not be empty"));
        }
        if quantity <= Decimal::ZERO {
            return Err(ExtractionError::validation("quantity", "must be greater than zero"));
        }
        if unit_price <= Decimal::ZERO {
            return Err(ExtractionError::validation("unit_price", "must be greater than zero"));
        }

        let amount = compute_amount(quantity, unit_price)
            .ok_or_else(|| ExtractionError::validation("amount", "quantity × unit price overflows"))?;

        Ok(Self {
            name,
            quantity,
            unit_price,
            amount,
            layout: None,
            source_line: None,
        })
    }
}

/// Result of extracting one receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Items in the order they appear on the receipt.
    pub items: Vec<LineItem>,

    /// Sum of all item amounts.
    pub total: Decimal,

    /// Normalized lines joined with newlines.
    pub normalized_text: String,

    /// Lines dropped by the summary/noise filter.
    #[serde(default)]
    pub filtered_lines: usize,

    /// Candidate lines that produced no item: no layout matched, or the
    /// item's amount would have overflowed the total.
    #[serde(default)]
    pub unmatched_lines: Vec<String>,
}

impl ExtractionResult {
    /// An empty result (no text, no items).
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Decimal::ZERO,
            normalized_text: String::new(),
            filtered_lines: 0,
            unmatched_lines: Vec::new(),
        }
    }

    /// Build a result from items, recomputing the total.
    pub fn from_items(
        items: Vec<LineItem>,
        normalized_text: impl Into<String>,
    ) -> Result<Self, ExtractionError> {
        let total = sum_amounts(&items)?;
        Ok(Self {
            items,
            total,
            normalized_text: normalized_text.into(),
            filtered_lines: 0,
            unmatched_lines: Vec::new(),
        })
    }

    /// Append an item (e.g. a manual entry) and update the total.
    pub fn with_item(mut self, item: LineItem) -> Result<Self, ExtractionError> {
        self.total = self
            .total
            .checked_add(item.amount)
            .ok_or_else(|| ExtractionError::validation("total", "sum of amounts overflows"))?;
        self.items.push(item);
        Ok(self)
    }

    /// Whether no line items were found.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fail with [`ExtractionError::NoData`] when no items were found.
    pub fn require_items(self) -> Result<Self, ExtractionError> {
        if self.is_empty() {
            Err(ExtractionError::NoData)
        } else {
            Ok(self)
        }
    }
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self::empty()
    }
}

fn sum_amounts(items: &[LineItem]) -> Result<Decimal, ExtractionError> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        total
            .checked_add(item.amount)
            .ok_or_else(|| ExtractionError::validation("total", "sum of amounts overflows"))
    })
}

/// Receipt payload handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Receipt-level identifier chosen by the caller.
    pub receipt_id: String,

    /// Sum of item amounts.
    pub total_amount: Decimal,

    /// When the receipt was scanned.
    pub scanned_at: DateTime<Utc>,

    /// One row per line item.
    pub items: Vec<ReceiptItemRow>,
}

/// One persisted line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItemRow {
    pub receipt_id: String,
    pub item_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
}

impl ReceiptRecord {
    /// Build the persistence payload for an extraction result.
    pub fn from_result(
        receipt_id: impl Into<String>,
        result: &ExtractionResult,
        scanned_at: DateTime<Utc>,
    ) -> Self {
        let receipt_id = receipt_id.into();
        let items = result
            .items
            .iter()
            .map(|item| ReceiptItemRow {
                receipt_id: receipt_id.clone(),
                item_name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total_amount: item.amount,
            })
            .collect();

        Self {
            receipt_id,
            total_amount: result.total,
            scanned_at,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_manual_item() {
        let item = LineItem::manual("  Rice 5kg ", Decimal::from(2), dec("250.50")).unwrap();
        assert_eq!(item.name, "Rice 5kg");
        assert_eq!(item.amount, dec("501.00"));
        assert_eq!(item.layout, None);
    }

    #[test]
    fn test_manual_item_validation() {
        assert!(matches!(
            LineItem::manual(" ", Decimal::ONE, Decimal::ONE),
            Err(ExtractionError::Validation { ref field, .. }) if field == "name"
        ));
        assert!(matches!(
            LineItem::manual("rice", Decimal::ZERO, Decimal::ONE),
            Err(ExtractionError::Validation { ref field, .. }) if field == "quantity"
        ));
        assert!(matches!(
            LineItem::manual("rice", Decimal::ONE, dec("-1.00")),
            Err(ExtractionError::Validation { ref field, .. }) if field == "unit_price"
        ));
    }

    #[test]
    fn test_with_item_updates_total() {
        let scanned = ExtractionResult::from_items(
            vec![LineItem::manual("milk", Decimal::ONE, dec("45.50")).unwrap()],
            "milk 45.50",
        )
        .unwrap();
        let extra = LineItem::manual("bread", Decimal::from(2), dec("12.50")).unwrap();
        let result = scanned.with_item(extra).unwrap();

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total, dec("70.50"));
    }

    #[test]
    fn test_require_items() {
        assert!(matches!(
            ExtractionResult::empty().require_items(),
            Err(ExtractionError::NoData)
        ));
    }

    #[test]
    fn test_receipt_record() {
        let result = ExtractionResult::from_items(
            vec![
                LineItem::manual("milk", Decimal::ONE, dec("45.50")).unwrap(),
                LineItem::manual("coke", Decimal::from(2), dec("25.00")).unwrap(),
            ],
            "",
        )
        .unwrap();
        let scanned_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let record = ReceiptRecord::from_result("r-42", &result, scanned_at);

        assert_eq!(record.total_amount, dec("95.50"));
        assert_eq!(record.items.len(), 2);
        assert_eq!(
            record.items[1],
            ReceiptItemRow {
                receipt_id: "r-42".to_string(),
                item_name: "coke".to_string(),
                quantity: dec("2"),
                unit_price: dec("25.00"),
                total_amount: dec("50.00"),
            }
        );
    }

    #[test]
    fn test_line_item_json_shape() {
        let item = LineItem::manual("milk", Decimal::ONE, dec("45.50")).unwrap();
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["name"], "milk");
        assert_eq!(json["amount"], "45.50");
        assert!(json.get("layout").is_none());
    }
}
