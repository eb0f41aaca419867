//! Shared regexes and amount helpers for receipt line extraction.

pub mod amounts;
pub mod patterns;

pub use amounts::{compute_amount, format_amount, parse_amount, parse_quantity, DEFAULT_CURRENCY_SYMBOL};
pub use patterns::*;
