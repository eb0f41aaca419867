//! Amount parsing and formatting for receipt lines.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::ExtractionError;

/// Currency symbol recognized on receipts and used for display.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";

/// Parse a currency value (e.g., "45.50", "₱45.50" or "45,50").
pub fn parse_amount(s: &str) -> Result<Decimal, ExtractionError> {
    let cleaned = s
        .trim()
        .trim_start_matches(DEFAULT_CURRENCY_SYMBOL)
        .trim()
        .replace(',', ".");

    Decimal::from_str(&cleaned).map_err(|_| ExtractionError::Parse {
        field: "amount".to_string(),
        value: s.to_string(),
    })
}

/// Parse an integer quantity into a decimal.
pub fn parse_quantity(s: &str) -> Result<Decimal, ExtractionError> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(ExtractionError::Parse {
            field: "quantity".to_string(),
            value: s.to_string(),
        });
    }

    Decimal::from_str(s).map_err(|_| ExtractionError::Parse {
        field: "quantity".to_string(),
        value: s.to_string(),
    })
}

/// Extended amount for a line without an explicit total, rounded to cents.
///
/// Returns `None` if the product does not fit in a `Decimal`.
pub fn compute_amount(quantity: Decimal, unit_price: Decimal) -> Option<Decimal> {
    quantity
        .checked_mul(unit_price)
        .map(|amount| amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Format an amount with a currency symbol and two decimals (₱45.50).
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("45.50").unwrap(), dec("45.50"));
        assert_eq!(parse_amount("₱45.50").unwrap(), dec("45.50"));
        assert_eq!(parse_amount(" 12,75 ").unwrap(), dec("12.75"));
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), Decimal::from(3));
        assert!(parse_quantity("3.5").is_err());
        assert!(parse_quantity("").is_err());
        // Wider than a Decimal mantissa
        assert!(parse_quantity("99999999999999999999999999999999").is_err());
    }

    #[test]
    fn test_compute_amount_rounds_to_cents() {
        assert_eq!(compute_amount(Decimal::from(3), dec("15.00")), Some(dec("45.00")));
        assert_eq!(compute_amount(dec("0.5"), dec("0.25")), Some(dec("0.13")));
        assert_eq!(compute_amount(Decimal::MAX, Decimal::from(2)), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("45.5"), "₱"), "₱45.50");
        assert_eq!(format_amount(Decimal::ZERO, "$"), "$0.00");
    }
}
