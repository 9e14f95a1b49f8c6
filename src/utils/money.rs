//! Cent-level helpers for monetary amounts

use bigdecimal::{BigDecimal, RoundingMode};

/// Number of decimal places every stored or reported amount carries
pub const MONEY_SCALE: i64 = 2;

/// Zero with cent scale
pub fn zero() -> BigDecimal {
    BigDecimal::from(0).with_scale(MONEY_SCALE)
}

/// Build an amount from a count of cents (`cents(1050)` is `10.50`)
pub fn cents(cents: i64) -> BigDecimal {
    BigDecimal::new(cents.into(), MONEY_SCALE)
}

/// One cent, the default comparison tolerance
pub fn cent() -> BigDecimal {
    cents(1)
}

/// Round to two decimals, halves away from zero
pub fn round2(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp)
}

/// `|amount| < tolerance`
pub fn is_negligible(amount: &BigDecimal, tolerance: &BigDecimal) -> bool {
    amount.abs() < *tolerance
}

/// Render an amount with exactly two decimals (`0.00`, `-3.50`, `1200.05`)
pub fn format(amount: &BigDecimal) -> String {
    let (cents, _) = round2(amount).with_scale(MONEY_SCALE).as_bigint_and_exponent();
    let digits = cents.to_string();
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(magnitude) => ("-", magnitude),
        None => ("", digits.as_str()),
    };
    let padded = format!("{:0>3}", digits);
    let (whole, fraction) = padded.split_at(padded.len() - 2);
    format!("{}{}.{}", sign, whole, fraction)
}
