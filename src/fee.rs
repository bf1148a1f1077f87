//! Per-transaction fees with explicit rounding.
//!
//! A fee is `round(|amount * rate|, digits, rule)`. The absolute value is taken
//! before rounding; [`fee_for`] is the only place those steps are sequenced.
//! Totals are sums of rounded fees and are never rounded themselves.

use crate::accumulator::{ExactDecimal, NumericRepresentation};
use crate::error::{LedgerError, Result};
use crate::rounding::RoundingRule;
use crate::total::{fold_tokens, AmountToken, RunningTotal};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A strictly positive fee rate, e.g. `0.00123` for 0.123%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRate(Decimal);

impl FeeRate {
    /// 0.123%
    pub const DEFAULT: Self = FeeRate(Decimal::from_parts(123, 0, 0, false, 5));

    /// Validates a rate. Zero and negative rates are rejected.
    pub fn new(rate: Decimal) -> Result<Self> {
        if rate <= Decimal::ZERO {
            warn!("Rejecting fee rate {}", rate);
            return Err(LedgerError::InvalidRate { rate });
        }
        Ok(FeeRate(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        FeeRate::DEFAULT
    }
}

impl FromStr for FeeRate {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let rate = crate::amount::parse_decimal(s).map_err(|e| LedgerError::parse(0, s, e))?;
        FeeRate::new(rate)
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of digits kept after the decimal point of each fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionDigits(u32);

impl FractionDigits {
    pub const DEFAULT: Self = FractionDigits(8);

    /// Validates a digit count. Negative counts are rejected.
    pub fn new(digits: i64) -> Result<Self> {
        u32::try_from(digits).map(FractionDigits).map_err(|_| {
            warn!("Rejecting fraction digits {}", digits);
            LedgerError::InvalidPrecision { digits }
        })
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for FractionDigits {
    fn default() -> Self {
        FractionDigits::DEFAULT
    }
}

/// Computes the fee for one amount.
///
/// Steps, in order: exact multiplication, absolute value, rounding. The
/// unrounded product is never exposed. Returns `None` if the product
/// overflows.
///
/// # Examples
///
/// ```
/// use fee_ledger::{fee_for, FeeRate, FractionDigits, RoundingRule};
/// use std::str::FromStr;
/// use rust_decimal::Decimal;
///
/// let amount = Decimal::from_str("-11.022038").unwrap();
/// let fee = fee_for(amount, FeeRate::DEFAULT, RoundingRule::HalfUp, FractionDigits::DEFAULT);
/// assert_eq!(fee.unwrap().to_string(), "0.01355711");
/// ```
pub fn fee_for(
    amount: Decimal,
    rate: FeeRate,
    rule: RoundingRule,
    digits: FractionDigits,
) -> Option<Decimal> {
    let product = amount.checked_mul(rate.value())?;
    Some(rule.round(product.abs(), digits.value()))
}

/// Fee totals under both rounding rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundingComparison {
    pub half_up: Decimal,
    pub half_even: Decimal,
    /// `half_up - half_even`
    pub difference: Decimal,
}

/// Validated fee configuration.
///
/// Construction is the only validation point, so an invalid rate or precision
/// fails before any token is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeCalculator {
    rate: FeeRate,
    digits: FractionDigits,
}

impl FeeCalculator {
    /// Creates a calculator from raw configuration values.
    pub fn new(rate: Decimal, fraction_digits: i64) -> Result<Self> {
        Ok(Self::with(
            FeeRate::new(rate)?,
            FractionDigits::new(fraction_digits)?,
        ))
    }

    pub fn with(rate: FeeRate, digits: FractionDigits) -> Self {
        FeeCalculator { rate, digits }
    }

    /// Fee for a single amount under `rule`.
    pub fn fee(&self, amount: Decimal, rule: RoundingRule) -> Option<Decimal> {
        fee_for(amount, self.rate, rule, self.digits)
    }

    /// Sums the rounded fees of every amount in `tokens`.
    pub fn compute_fees<I>(&self, tokens: I, rule: RoundingRule) -> Result<RunningTotal<Decimal>>
    where
        I: IntoIterator,
        I::Item: AmountToken,
    {
        let total = fold_tokens(tokens, Decimal::ZERO, |index, total, token| {
            let amount =
                ExactDecimal::parse(token).map_err(|e| LedgerError::parse(index, token, e))?;
            self.fee(amount, rule)
                .and_then(|fee| total.checked_add(fee))
                .ok_or(LedgerError::Overflow { index })
        })?;

        debug!(
            "Fees for {} amounts at rate {} ({}, {} digits): {}",
            total.count(),
            self.rate,
            rule,
            self.digits.value(),
            total.value()
        );
        Ok(total)
    }

    /// Sums the fees of the same sequence once per rounding rule.
    ///
    /// `source` is called once per rule and must yield the same tokens in
    /// the same order each time.
    pub fn compare_rounding<F, I>(&self, mut source: F) -> Result<RoundingComparison>
    where
        F: FnMut() -> Result<I>,
        I: IntoIterator,
        I::Item: AmountToken,
    {
        let half_up = self.compute_fees(source()?, RoundingRule::HalfUp)?.value();
        let half_even = self.compute_fees(source()?, RoundingRule::HalfEven)?.value();
        let difference = half_up
            .checked_sub(half_even)
            .ok_or(LedgerError::TotalOverflow {
                what: "rounding difference",
            })?;

        Ok(RoundingComparison {
            half_up,
            half_even,
            difference,
        })
    }
}

/// Sums rounded fees over `tokens`.
///
/// The rate and precision are validated before the first token is pulled.
///
/// # Examples
///
/// ```
/// use fee_ledger::{compute_fees, RoundingRule};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from_str("0.00123").unwrap();
/// let total = compute_fees(["-11.022038"], rate, RoundingRule::HalfUp, 8).unwrap();
/// assert_eq!(total.value().to_string(), "0.01355711");
/// ```
pub fn compute_fees<I>(
    tokens: I,
    fee_rate: Decimal,
    rule: RoundingRule,
    fraction_digits: i64,
) -> Result<RunningTotal<Decimal>>
where
    I: IntoIterator,
    I::Item: AmountToken,
{
    FeeCalculator::new(fee_rate, fraction_digits)?.compute_fees(tokens, rule)
}

/// Runs [`compute_fees`] under both rounding rules and reports the gap.
pub fn compare_rounding<F, I>(
    source: F,
    fee_rate: Decimal,
    fraction_digits: i64,
) -> Result<RoundingComparison>
where
    F: FnMut() -> Result<I>,
    I: IntoIterator,
    I::Item: AmountToken,
{
    FeeCalculator::new(fee_rate, fraction_digits)?.compare_rounding(source)
}
