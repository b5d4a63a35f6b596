//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to cents, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(round_to_cents(dec("1683.786666")), dec("1683.79"));
/// assert_eq!(round_to_cents(dec("0.005")), dec("0.01"));
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(round_to_cents(dec("268.805")), dec("268.81"));
        assert_eq!(round_to_cents(dec("268.804")), dec("268.80"));
    }

    #[test]
    fn test_rounds_negative_half_away_from_zero() {
        assert_eq!(round_to_cents(dec("-0.005")), dec("-0.01"));
    }

    #[test]
    fn test_leaves_cents_untouched() {
        assert_eq!(round_to_cents(dec("12500.00")), dec("12500"));
        assert_eq!(round_to_cents(Decimal::ZERO), Decimal::ZERO);
    }
}
