//! Amount normalization for statement cells.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a statement amount ("1 234,56", "1234.56", "-15,00").
///
/// Non-breaking and ordinary spaces are thousands separators, a comma is the
/// decimal separator, and anything that is not a digit, a decimal point or a
/// leading minus is dropped. Unparseable input yields `None`.
pub fn normalize_amount(raw: &str) -> Option<Decimal> {
    let compact: String = raw
        .replace('\u{00a0}', " ")
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let mut cleaned = String::with_capacity(compact.len());
    for c in compact.chars() {
        if c.is_ascii_digit() || c == '.' || (c == '-' && cleaned.is_empty()) {
            cleaned.push(c);
        }
    }

    Decimal::from_str(&cleaned).ok()
}

/// Whether an amount passes the credit filter.
pub fn is_positive_credit(amount: Option<Decimal>) -> bool {
    amount.is_some_and(|a| a > Decimal::ZERO)
}

/// Format an amount with two fraction digits, optionally with a decimal comma.
pub fn format_amount(amount: Decimal, decimal_comma: bool) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    let s = rounded.to_string();
    if decimal_comma {
        s.replace('.', ",")
    } else {
        s
    }
}
