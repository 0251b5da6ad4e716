//! Display order number
//!
//! A short human-facing label derived from the order identifier: the last
//! three digits found anywhere in the id, zero-padded on the left. Many ids
//! share a number, so it is only ever printed, never used to look an order up.

use serde::Serialize;
use std::fmt;

/// Number of digits in a display order number
pub const ORDER_NUMBER_WIDTH: usize = 3;

/// 3-digit display label for an order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayOrderNumber(String);

impl DisplayOrderNumber {
    pub fn from_order_id(order_id: &str) -> Self {
        Self(display_order_number(order_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayOrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the display number for an order identifier
pub fn display_order_number(order_id: &str) -> String {
    let digits: Vec<char> = order_id.chars().filter(char::is_ascii_digit).collect();
    let tail: String = digits[digits.len().saturating_sub(ORDER_NUMBER_WIDTH)..]
        .iter()
        .collect();
    format!("{:0>width$}", tail, width = ORDER_NUMBER_WIDTH)
}
