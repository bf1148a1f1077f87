//! Tie-breaking rounding rules.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// How a value exactly halfway between two candidates is rounded.
///
/// Values that are not ties round to the nearer candidate under both rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingRule {
    /// Ties round away from zero (`ROUND_HALF_UP`).
    HalfUp,

    /// Ties round to the even last digit (banker's rounding).
    HalfEven,
}

impl RoundingRule {
    /// Both rules, in comparison order.
    pub const ALL: [RoundingRule; 2] = [RoundingRule::HalfUp, RoundingRule::HalfEven];

    /// Rounds `value` to `fraction_digits` digits after the decimal point.
    ///
    /// Values that already have no more than `fraction_digits` digits are
    /// returned unchanged.
    pub fn round(self, value: Decimal, fraction_digits: u32) -> Decimal {
        value.round_dp_with_strategy(fraction_digits, self.strategy())
    }

    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingRule::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingRule::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl fmt::Display for RoundingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingRule::HalfUp => write!(f, "half-up"),
            RoundingRule::HalfEven => write!(f, "half-even"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_ties() {
        assert_eq!(RoundingRule::HalfUp.round(d("0.000001845"), 8), d("0.00000185"));
        assert_eq!(RoundingRule::HalfEven.round(d("0.000001845"), 8), d("0.00000184"));

        // odd retained digit: both rules agree
        assert_eq!(RoundingRule::HalfUp.round(d("0.000000615"), 8), d("0.00000062"));
        assert_eq!(RoundingRule::HalfEven.round(d("0.000000615"), 8), d("0.00000062"));
    }

    #[test]
    fn test_negative_ties() {
        assert_eq!(RoundingRule::HalfUp.round(d("-2.5"), 0), d("-3"));
        assert_eq!(RoundingRule::HalfEven.round(d("-2.5"), 0), d("-2"));
    }

    #[test]
    fn test_non_ties_round_to_nearest() {
        for rule in RoundingRule::ALL {
            assert_eq!(rule.round(d("0.01355710674"), 8), d("0.01355711"));
            assert_eq!(rule.round(d("0.03671886405"), 8), d("0.03671886"));
            assert_eq!(rule.round(d("0.0000000251"), 8), d("0.00000003"));
        }
    }

    #[test]
    fn test_short_values_unchanged() {
        assert_eq!(RoundingRule::HalfUp.round(d("1.5"), 8).to_string(), "1.5");
    }

    #[test]
    fn test_display() {
        assert_eq!(RoundingRule::HalfUp.to_string(), "half-up");
        assert_eq!(RoundingRule::HalfEven.to_string(), "half-even");
    }
}
