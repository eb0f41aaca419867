//! Running total and ordered item collection.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::receipt::{ExtractionResult, LineItem};

/// Accumulates extracted items in source order.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    items: Vec<LineItem>,
    total: Decimal,
    filtered_lines: usize,
    unmatched_lines: Vec<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item and its amount to the running total.
    ///
    /// An item whose amount would overflow the total is dropped and its
    /// source `line` recorded as unmatched, so the total always equals the
    /// sum of the items.
    pub fn push(&mut self, item: LineItem, line: &str) {
        match self.total.checked_add(item.amount) {
            Some(total) => {
                self.total = total;
                self.items.push(item);
            }
            None => {
                warn!("Dropping line {:?}: total would overflow", line);
                self.unmatched_lines.push(line.to_string());
            }
        }
    }

    /// Record a line the filter rejected.
    pub fn record_filtered(&mut self) {
        self.filtered_lines += 1;
    }

    /// Record a line no layout matched.
    pub fn record_unmatched(&mut self, line: &str) {
        self.unmatched_lines.push(line.to_string());
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finish aggregation.
    pub fn finish(self, normalized_text: String) -> ExtractionResult {
        ExtractionResult {
            items: self.items,
            total: self.total,
            normalized_text,
            filtered_lines: self.filtered_lines,
            unmatched_lines: self.unmatched_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(name: &str, amount: &str) -> LineItem {
        let amount = Decimal::from_str(amount).unwrap();
        LineItem {
            name: name.to_string(),
            quantity: Decimal::ONE,
            unit_price: amount,
            amount,
            layout: None,
            source_line: None,
        }
    }

    #[test]
    fn test_running_total_keeps_order() {
        let mut agg = Aggregator::new();
        agg.push(item("milk", "45.50"), "milk 45.50");
        agg.push(item("bread", "25.00"), "bread 25.00");
        agg.record_filtered();
        agg.record_unmatched("thank you");

        assert_eq!(agg.len(), 2);
        let result = agg.finish("milk 45.50\nbread 25.00".to_string());
        assert_eq!(result.total, Decimal::from_str("70.50").unwrap());
        assert_eq!(result.items[0].name, "milk");
        assert_eq!(result.items[1].name, "bread");
        assert_eq!(result.filtered_lines, 1);
        assert_eq!(result.unmatched_lines, vec!["thank you".to_string()]);
    }

    #[test]
    fn test_overflowing_item_is_not_counted() {
        let mut agg = Aggregator::new();
        agg.push(item("a", "1.00"), "apple 1.00");
        let mut huge = item("b", "1.00");
        huge.amount = Decimal::MAX;
        agg.push(huge, "9 bulk gold 79228162514264337593543950335");

        assert_eq!(agg.len(), 1);
        assert_eq!(agg.total(), Decimal::ONE);
        let result = agg.finish(String::new());
        assert_eq!(
            result.unmatched_lines,
            vec!["9 bulk gold 79228162514264337593543950335".to_string()]
        );
    }
}
