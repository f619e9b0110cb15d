//! Monetary amounts.
//!
//! The platform reports prices as decimal strings (`"110.00"`). Everything this
//! service compares is held in integer minor units so a cart worth exactly the
//! threshold qualifies.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Errors converting platform amounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is not a decimal number.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// The amount is negative or too large to represent.
    #[error("amount out of range: {0:?}")]
    OutOfRange(String),
}

/// Parse a decimal major-unit string into minor units.
///
/// Sub-minor fractions are rounded half away from zero.
///
/// # Errors
///
/// Returns an error if the string is not a decimal, is negative, or overflows.
pub fn parse_minor_units(amount: &str) -> Result<u64, MoneyError> {
    let trimmed = amount.trim();

    let value = trimmed
        .parse::<Decimal>()
        .map_err(|_err| MoneyError::InvalidAmount(amount.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(MoneyError::OutOfRange(amount.to_string()));
    }

    value
        .checked_mul(Decimal::new(MINOR_UNITS_PER_MAJOR, 0))
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_u64())
        .ok_or_else(|| MoneyError::OutOfRange(amount.to_string()))
}

/// Render minor units as a two-decimal major-unit string.
pub fn format_minor_units(minor: u64) -> String {
    format!("{}.{:02}", minor / 100, minor % 100)
}
