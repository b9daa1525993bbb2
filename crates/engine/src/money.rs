//! Decimal accumulation helpers.
//!
//! Stored amounts are `f64`, but every aggregation runs on
//! [`rust_decimal::Decimal`] and converts back to a 2-decimal float only at
//! the output boundary, so repeated sums cannot drift.

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

/// Lift a stored amount into `Decimal`. Non-finite values collapse to zero;
/// validation rejects them long before they reach an aggregation.
pub(crate) fn dec(amount: f64) -> Decimal {
    Decimal::from_f64(amount).unwrap_or_default()
}

/// Round to 2 decimals and convert back to `f64` for output.
pub(crate) fn round2(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or(0.0)
}

/// Round to 1 decimal, used for percentages.
pub(crate) fn round1(value: Decimal) -> f64 {
    value.round_dp(1).to_f64().unwrap_or(0.0)
}

/// `part / whole * 100`, rounded to 1 decimal. Returns 0 when `whole <= 0`.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    round1(part / whole * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulation_has_no_float_drift() {
        // 0.1 + 0.2 is the classic f64 counterexample.
        let total = dec(0.1) + dec(0.2);
        assert_eq!(round2(total), 0.3);
    }

    #[test]
    fn percent_guards_zero_whole() {
        assert_eq!(percent_of(dec(120.0), Decimal::ZERO), 0.0);
        assert_eq!(percent_of(dec(120.0), dec(-5.0)), 0.0);
        assert_eq!(percent_of(dec(120.0), dec(100.0)), 120.0);
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(percent_of(dec(1.0), dec(3.0)), 33.3);
    }
}
