//! Null-safe money arithmetic.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Stored amounts are `Option<Decimal>`; a missing amount counts as zero and
//! is never an error.

use rust_decimal::Decimal;

/// Reads an optional amount, treating a missing value as zero.
#[must_use]
pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

/// Sums optional amounts, treating missing values as zero.
#[must_use]
pub fn sum_or_zero<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    values.into_iter().map(or_zero).sum()
}

/// Formats an amount with two decimal places for API responses.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
