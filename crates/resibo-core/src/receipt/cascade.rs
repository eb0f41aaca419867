//! Priority-ordered table of receipt line layouts.
//!
//! Each rule describes one layout as a regex plus a mapping from capture
//! groups to line item fields. Rules are tried in table order and the first
//! one that matches wins; there is no backtracking. Pair rules take the item
//! name from the current line and the numbers from the following line.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::receipt::LineItem;

use super::normalize::NormalizedLine;
use super::rules::{compute_amount, parse_amount, parse_quantity, patterns::*};

/// Receipt layouts, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// `NAME PRICE`
    NamePrice,
    /// `QTY NAME AMOUNT`
    QtyNameAmount,
    /// `QTY NAME @ PRICE AMOUNT`
    QtyNameAtPriceAmount,
    /// `NAME QTY PRICE AMOUNT`
    NameQtyPriceAmount,
    /// `NAME - QTY @ PRICE = AMOUNT`
    NameDashQtyAtPriceEqAmount,
    /// `NAME` / `QTY x PRICE [AMOUNT]`
    NameThenQtyXPriceOptAmount,
    /// `NAME` / `PRICE AMOUNT`
    NameThenPriceAmount,
    /// `QTY NAME PRICE`
    QtyNamePrice,
    /// `NAME` / `QTY x PRICE`
    NameThenQtyXPrice,
    /// `NAME` / `QTY x PRICE = AMOUNT`
    NameThenQtyXPriceEqAmount,
    /// `NAME QTY@PRICE`
    NameQtyAtPrice,
    /// `QTY NAME PRICE[v]`
    QtyNamePriceFlagged,
}

impl Layout {
    /// All layouts, highest priority first.
    pub const ALL: [Layout; 12] = [
        Layout::NamePrice,
        Layout::QtyNameAmount,
        Layout::QtyNameAtPriceAmount,
        Layout::NameQtyPriceAmount,
        Layout::NameDashQtyAtPriceEqAmount,
        Layout::NameThenQtyXPriceOptAmount,
        Layout::NameThenPriceAmount,
        Layout::QtyNamePrice,
        Layout::NameThenQtyXPrice,
        Layout::NameThenQtyXPriceEqAmount,
        Layout::NameQtyAtPrice,
        Layout::QtyNamePriceFlagged,
    ];

    /// 1-based priority; lower wins.
    pub fn priority(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).map_or(0, |p| p + 1)
    }

    /// Number of lines a match of this layout consumes.
    pub fn line_span(self) -> usize {
        match self {
            Layout::NameThenQtyXPriceOptAmount
            | Layout::NameThenPriceAmount
            | Layout::NameThenQtyXPrice
            | Layout::NameThenQtyXPriceEqAmount => 2,
            _ => 1,
        }
    }

    /// Human readable shape of the layout.
    pub fn shape(self) -> &'static str {
        match self {
            Layout::NamePrice => "NAME PRICE",
            Layout::QtyNameAmount => "QTY NAME AMOUNT",
            Layout::QtyNameAtPriceAmount => "QTY NAME @ PRICE AMOUNT",
            Layout::NameQtyPriceAmount => "NAME QTY PRICE AMOUNT",
            Layout::NameDashQtyAtPriceEqAmount => "NAME - QTY @ PRICE = AMOUNT",
            Layout::NameThenQtyXPriceOptAmount => "NAME / QTY x PRICE [AMOUNT]",
            Layout::NameThenPriceAmount => "NAME / PRICE AMOUNT",
            Layout::QtyNamePrice => "QTY NAME PRICE",
            Layout::NameThenQtyXPrice => "NAME / QTY x PRICE",
            Layout::NameThenQtyXPriceEqAmount => "NAME / QTY x PRICE = AMOUNT",
            Layout::NameQtyAtPrice => "NAME QTY@PRICE",
            Layout::QtyNamePriceFlagged => "QTY NAME PRICE[v]",
        }
    }
}

/// Where the item name comes from.
#[derive(Debug, Clone, Copy)]
enum Name {
    /// A capture group of the matched line.
    Group(usize),
    /// The whole current line; the pattern runs against the next line.
    HeaderLine,
}

#[derive(Debug, Clone, Copy)]
enum Quantity {
    One,
    Group(usize),
}

#[derive(Debug, Clone, Copy)]
enum Amount {
    /// The unit price is also the extended amount.
    Price,
    Group(usize),
    /// Use the group when present, else quantity × unit price.
    GroupOrComputed(usize),
    Computed,
}

/// One entry of the cascade table.
struct Rule {
    layout: Layout,
    pattern: &'static Regex,
    name: Name,
    quantity: Quantity,
    price: usize,
    amount: Amount,
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        Rule {
            layout: Layout::NamePrice,
            pattern: &NAME_PRICE,
            name: Name::Group(1),
            quantity: Quantity::One,
            price: 2,
            amount: Amount::Price,
        },
        Rule {
            layout: Layout::QtyNameAmount,
            pattern: &QTY_NAME_AMOUNT,
            name: Name::Group(2),
            quantity: Quantity::Group(1),
            price: 3,
            amount: Amount::Price,
        },
        Rule {
            layout: Layout::QtyNameAtPriceAmount,
            pattern: &QTY_NAME_AT_PRICE_AMOUNT,
            name: Name::Group(2),
            quantity: Quantity::Group(1),
            price: 3,
            amount: Amount::Group(4),
        },
        Rule {
            layout: Layout::NameQtyPriceAmount,
            pattern: &NAME_QTY_PRICE_AMOUNT,
            name: Name::Group(1),
            quantity: Quantity::Group(2),
            price: 3,
            amount: Amount::Group(4),
        },
        Rule {
            layout: Layout::NameDashQtyAtPriceEqAmount,
            pattern: &NAME_DASH_QTY_AT_PRICE_EQ_AMOUNT,
            name: Name::Group(1),
            quantity: Quantity::Group(2),
            price: 3,
            amount: Amount::Group(4),
        },
        Rule {
            layout: Layout::NameThenQtyXPriceOptAmount,
            pattern: &QTY_X_PRICE_OPT_AMOUNT,
            name: Name::HeaderLine,
            quantity: Quantity::Group(1),
            price: 2,
            amount: Amount::GroupOrComputed(3),
        },
        Rule {
            layout: Layout::NameThenPriceAmount,
            pattern: &PRICE_AMOUNT,
            name: Name::HeaderLine,
            quantity: Quantity::One,
            price: 1,
            amount: Amount::Group(2),
        },
        Rule {
            layout: Layout::QtyNamePrice,
            pattern: &QTY_NAME_PRICE,
            name: Name::Group(2),
            quantity: Quantity::Group(1),
            price: 3,
            amount: Amount::Computed,
        },
        Rule {
            layout: Layout::NameThenQtyXPrice,
            pattern: &QTY_X_PRICE,
            name: Name::HeaderLine,
            quantity: Quantity::Group(1),
            price: 2,
            amount: Amount::Computed,
        },
        Rule {
            layout: Layout::NameThenQtyXPriceEqAmount,
            pattern: &QTY_X_PRICE_EQ_AMOUNT,
            name: Name::HeaderLine,
            quantity: Quantity::Group(1),
            price: 2,
            amount: Amount::Group(3),
        },
        Rule {
            layout: Layout::NameQtyAtPrice,
            pattern: &NAME_QTY_AT_PRICE,
            name: Name::Group(1),
            quantity: Quantity::Group(2),
            price: 3,
            amount: Amount::Computed,
        },
        Rule {
            layout: Layout::QtyNamePriceFlagged,
            pattern: &QTY_NAME_PRICE_FLAGGED,
            name: Name::Group(2),
            quantity: Quantity::Group(1),
            price: 3,
            amount: Amount::Computed,
        },
    ];
}

impl Rule {
    fn apply(&self, line: &NormalizedLine, next: Option<&NormalizedLine>) -> Option<LineItem> {
        let target = match self.name {
            Name::Group(_) => line,
            Name::HeaderLine => next?,
        };
        let caps = self.pattern.captures(&target.content)?;

        let name = match self.name {
            Name::Group(group) => caps.get(group)?.as_str().trim(),
            Name::HeaderLine => line.content.trim(),
        };
        if name.is_empty() {
            return None;
        }

        let quantity = match self.quantity {
            Quantity::One => Decimal::ONE,
            Quantity::Group(group) => parse_quantity(caps.get(group)?.as_str()).ok()?,
        };
        let unit_price = parse_amount(caps.get(self.price)?.as_str()).ok()?;

        let amount = match self.amount {
            Amount::Price => unit_price,
            Amount::Group(group) => parse_amount(caps.get(group)?.as_str()).ok()?,
            Amount::GroupOrComputed(group) => match caps.get(group) {
                Some(m) => parse_amount(m.as_str()).ok()?,
                None => compute_amount(quantity, unit_price)?,
            },
            Amount::Computed => compute_amount(quantity, unit_price)?,
        };

        Some(LineItem {
            name: name.to_string(),
            quantity,
            unit_price,
            amount,
            layout: Some(self.layout),
            source_line: Some(line.source_index),
        })
    }
}

/// A successful cascade step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeMatch {
    /// The extracted item.
    pub item: LineItem,
    /// Layout that produced it.
    pub layout: Layout,
    /// Lines consumed (1 or 2).
    pub consumed: usize,
}

/// The ordered layout grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cascade;

impl Cascade {
    pub fn new() -> Self {
        Self
    }

    /// Try every layout at `lines[index]`, highest priority first.
    pub fn match_at(&self, lines: &[NormalizedLine], index: usize) -> Option<CascadeMatch> {
        let line = lines.get(index)?;
        let next = lines.get(index + 1);

        RULES.iter().find_map(|rule| {
            let item = rule.apply(line, next)?;
            trace!("Line {} matched {:?}", line.source_index, rule.layout);
            Some(CascadeMatch {
                item,
                layout: rule.layout,
                consumed: rule.layout.line_span(),
            })
        })
    }

    /// Try a single layout at `lines[index]`, ignoring priority.
    pub fn match_layout(
        &self,
        layout: Layout,
        lines: &[NormalizedLine],
        index: usize,
    ) -> Option<LineItem> {
        let line = lines.get(index)?;
        let rule = RULES.iter().find(|rule| rule.layout == layout)?;
        rule.apply(line, lines.get(index + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn lines(contents: &[&str]) -> Vec<NormalizedLine> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| NormalizedLine::new(*c, i))
            .collect()
    }

    fn fields(item: &LineItem) -> (&str, Decimal, Decimal, Decimal) {
        (item.name.as_str(), item.quantity, item.unit_price, item.amount)
    }

    #[test]
    fn test_table_order_matches_layout_priority() {
        let order: Vec<Layout> = RULES.iter().map(|r| r.layout).collect();
        assert_eq!(order, Layout::ALL.to_vec());
        assert_eq!(Layout::NamePrice.priority(), 1);
        assert_eq!(Layout::QtyNamePriceFlagged.priority(), 12);
    }

    #[test]
    fn test_each_layout_in_isolation() {
        let cascade = Cascade::new();
        let cases: [(Layout, &[&str], (&str, &str, &str, &str)); 12] = [
            (Layout::NamePrice, &["milk 45.50"], ("milk", "1", "45.50", "45.50")),
            (Layout::QtyNameAmount, &["2 coke 50.00"], ("coke", "2", "50.00", "50.00")),
            (
                Layout::QtyNameAtPriceAmount,
                &["2 coke @ 25.00 50.00"],
                ("coke", "2", "25.00", "50.00"),
            ),
            (
                Layout::NameQtyPriceAmount,
                &["coke 2 25.00 50.00"],
                ("coke", "2", "25.00", "50.00"),
            ),
            (
                Layout::NameDashQtyAtPriceEqAmount,
                &["coke - 2 @ 25.00 = 50.00"],
                ("coke", "2", "25.00", "50.00"),
            ),
            (
                Layout::NameThenQtyXPriceOptAmount,
                &["sardines", "3 x 15.00"],
                ("sardines", "3", "15.00", "45.00"),
            ),
            (
                Layout::NameThenPriceAmount,
                &["corned beef", "₱40.00 ₱80.00"],
                ("corned beef", "1", "40.00", "80.00"),
            ),
            (Layout::QtyNamePrice, &["3 eggs 8.25"], ("eggs", "3", "8.25", "24.75")),
            (
                Layout::NameThenQtyXPrice,
                &["noodles", "4x12.50"],
                ("noodles", "4", "12.50", "50.00"),
            ),
            (
                Layout::NameThenQtyXPriceEqAmount,
                &["noodles", "4 x 12.50 = 50.00"],
                ("noodles", "4", "12.50", "50.00"),
            ),
            (Layout::NameQtyAtPrice, &["bottled water 6@18.00"], ("bottled water", "6", "18.00", "108.00")),
            (Layout::QtyNamePriceFlagged, &["2 rice 1kg 55.00v"], ("rice 1kg", "2", "55.00", "110.00")),
        ];

        for (layout, input, expected) in cases {
            let item = cascade
                .match_layout(layout, &lines(input), 0)
                .unwrap_or_else(|| panic!("{:?} did not match {:?}", layout, input));
            assert_eq!(
                fields(&item),
                (expected.0, dec(expected.1), dec(expected.2), dec(expected.3)),
                "{:?}",
                layout
            );
            assert_eq!(item.layout, Some(layout));
        }
    }

    #[test]
    fn test_first_match_wins() {
        let cascade = Cascade::new();

        // Also a valid header line for a pair layout, but NAME PRICE comes first.
        let m = cascade.match_at(&lines(&["milk 45.50", "2 x 3.00"]), 0).unwrap();
        assert_eq!(m.layout, Layout::NamePrice);
        assert_eq!(m.consumed, 1);

        // QTY NAME AMOUNT shadows the `@` layout.
        let m = cascade.match_at(&lines(&["2 coke @ 25.00 50.00"]), 0).unwrap();
        assert_eq!(m.layout, Layout::QtyNameAmount);
        assert_eq!(m.item.name, "coke @ 25.00");
    }

    #[test]
    fn test_pair_layout_consumes_two_lines() {
        let cascade = Cascade::new();
        let input = lines(&["sardines", "3 x 15.00 45.00"]);
        let m = cascade.match_at(&input, 0).unwrap();

        assert_eq!(m.layout, Layout::NameThenQtyXPriceOptAmount);
        assert_eq!(m.consumed, 2);
        assert_eq!(m.item.amount, dec("45.00"));
        assert_eq!(m.item.source_line, Some(0));
    }

    #[test]
    fn test_explicit_amount_is_taken_verbatim() {
        let cascade = Cascade::new();
        let m = cascade.match_at(&lines(&["sardines", "3 x 15.00 40.00"]), 0).unwrap();
        assert_eq!(m.item.amount, dec("40.00"));
    }

    #[test]
    fn test_pair_layout_needs_a_next_line() {
        let cascade = Cascade::new();
        assert!(cascade.match_at(&lines(&["sardines"]), 0).is_none());
        assert!(cascade.match_at(&lines(&["milk 45.50"]), 1).is_none());
    }

    #[test]
    fn test_unparseable_quantity_falls_through() {
        let cascade = Cascade::new();
        let huge = "99999999999999999999999999999999 coke 50.00";
        assert!(cascade.match_at(&lines(&[huge]), 0).is_none());
    }

    #[test]
    fn test_no_match() {
        let cascade = Cascade::new();
        assert!(cascade.match_at(&lines(&["thank you for shopping"]), 0).is_none());
        assert!(cascade.match_at(&lines(&["milk 45.5"]), 0).is_none());
    }
}
