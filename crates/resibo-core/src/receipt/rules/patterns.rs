//! Common regex patterns for receipt line extraction.
//!
//! Every line pattern is anchored to the whole normalized line. Currency
//! values are `[0-9]+\.[0-9]{2}` with an optional leading `₱`, quantities are
//! bare integers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Normalization
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s{2,}").unwrap();

    pub static ref ANY_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // NAME PRICE (letters and spaces only in the name)
    pub static ref NAME_PRICE: Regex = Regex::new(
        r"^([a-z\s]+)\s+₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // QTY NAME AMOUNT
    pub static ref QTY_NAME_AMOUNT: Regex = Regex::new(
        r"^([0-9]+)\s+(.+?)\s+₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // QTY NAME @ PRICE AMOUNT
    pub static ref QTY_NAME_AT_PRICE_AMOUNT: Regex = Regex::new(
        r"^([0-9]+)\s+(.+?)\s+@\s*₱?([0-9]+\.[0-9]{2})\s+₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // NAME QTY PRICE AMOUNT
    pub static ref NAME_QTY_PRICE_AMOUNT: Regex = Regex::new(
        r"^(.+?)\s+([0-9]+)\s+₱?([0-9]+\.[0-9]{2})\s+₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // NAME - QTY @ PRICE = AMOUNT
    pub static ref NAME_DASH_QTY_AT_PRICE_EQ_AMOUNT: Regex = Regex::new(
        r"^(.+?)\s*-\s*([0-9]+)\s*@\s*₱?([0-9]+\.[0-9]{2})\s*=\s*₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // Second line: QTY x PRICE [AMOUNT]
    pub static ref QTY_X_PRICE_OPT_AMOUNT: Regex = Regex::new(
        r"^([0-9]+)\s*x\s*₱?([0-9]+\.[0-9]{2})\s*(?:₱?([0-9]+\.[0-9]{2}))?$"
    ).unwrap();

    // Second line: PRICE AMOUNT
    pub static ref PRICE_AMOUNT: Regex = Regex::new(
        r"^₱?([0-9]+\.[0-9]{2})\s+₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // QTY NAME PRICE (letters and spaces only in the name)
    pub static ref QTY_NAME_PRICE: Regex = Regex::new(
        r"^([0-9]+)\s+([a-z\s]+)\s+₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // Second line: QTY x PRICE
    pub static ref QTY_X_PRICE: Regex = Regex::new(
        r"^([0-9]+)\s*x\s*₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // Second line: QTY x PRICE = AMOUNT
    pub static ref QTY_X_PRICE_EQ_AMOUNT: Regex = Regex::new(
        r"^([0-9]+)\s*x\s*₱?([0-9]+\.[0-9]{2})\s*=\s*₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // NAME QTY@PRICE
    pub static ref NAME_QTY_AT_PRICE: Regex = Regex::new(
        r"^(.+?)\s+([0-9]+)@₱?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // QTY NAME PRICE with a trailing `v` flag
    pub static ref QTY_NAME_PRICE_FLAGGED: Regex = Regex::new(
        r"^([0-9]+)\s+(.+?)\s+₱?([0-9]+\.[0-9]{2})v?$"
    ).unwrap();
}
