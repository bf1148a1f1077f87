//! Summing amount sequences as binary floats or exact decimals.
//!
//! The fold is written once against [`NumericRepresentation`]; the
//! [`Representation`] enum picks an implementation at run time. A new
//! representation only needs a trait impl and an enum variant.

use crate::amount::{self, AmountParseError};
use crate::error::{LedgerError, Result};
use crate::total::{fold_tokens, AmountToken, RunningTotal};
use log::debug;
use rust_decimal::Decimal;
use std::fmt;

/// A numeric type amounts can be parsed into and summed in.
pub trait NumericRepresentation {
    type Value: Copy + fmt::Display;

    const KIND: Representation;

    fn zero() -> Self::Value;

    fn parse(token: &str) -> std::result::Result<Self::Value, AmountParseError>;

    /// Returns `None` when the sum leaves the representable range.
    fn add(total: Self::Value, amount: Self::Value) -> Option<Self::Value>;
}

/// `f64` accumulation. Fast, approximate.
#[derive(Debug, Clone, Copy)]
pub struct FloatingPoint;

impl NumericRepresentation for FloatingPoint {
    type Value = f64;

    const KIND: Representation = Representation::FloatingPoint;

    fn zero() -> f64 {
        0.0
    }

    fn parse(token: &str) -> std::result::Result<f64, AmountParseError> {
        amount::parse_float(token)
    }

    fn add(total: f64, amount: f64) -> Option<f64> {
        Some(total + amount)
    }
}

/// `Decimal` accumulation. Exact within 28 significant digits.
#[derive(Debug, Clone, Copy)]
pub struct ExactDecimal;

impl NumericRepresentation for ExactDecimal {
    type Value = Decimal;

    const KIND: Representation = Representation::ExactDecimal;

    fn zero() -> Decimal {
        Decimal::ZERO
    }

    fn parse(token: &str) -> std::result::Result<Decimal, AmountParseError> {
        amount::parse_decimal(token)
    }

    fn add(total: Decimal, amount: Decimal) -> Option<Decimal> {
        total.checked_add(amount)
    }
}

/// Run-time choice of numeric representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    FloatingPoint,
    ExactDecimal,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::FloatingPoint => write!(f, "floating-point"),
            Representation::ExactDecimal => write!(f, "exact-decimal"),
        }
    }
}

/// A total in whichever representation produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Total {
    Float(f64),
    Decimal(Decimal),
}

impl Total {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Total::Float(v) => Some(*v),
            Total::Decimal(_) => None,
        }
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Total::Float(v) => write!(f, "{}", v),
            Total::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// Sums `tokens` in the representation `R`.
///
/// Items are added in encounter order. The first malformed token aborts the
/// fold with [`LedgerError::Parse`].
pub fn accumulate_as<R, I>(tokens: I) -> Result<RunningTotal<R::Value>>
where
    R: NumericRepresentation,
    I: IntoIterator,
    I::Item: AmountToken,
{
    let total = fold_tokens(tokens, R::zero(), |index, total, token| {
        let amount = R::parse(token).map_err(|e| LedgerError::parse(index, token, e))?;
        R::add(total, amount).ok_or(LedgerError::Overflow { index })
    })?;

    debug!(
        "Accumulated {} amounts as {}: {}",
        total.count(),
        R::KIND,
        total.value()
    );
    Ok(total)
}

/// Sums `tokens` in the chosen representation.
///
/// # Examples
///
/// ```
/// use fee_ledger::{accumulate, Representation};
///
/// let tokens = ["-11.022038", "16.161836"];
/// let total = accumulate(tokens, Representation::ExactDecimal).unwrap();
/// assert_eq!(total.value().to_string(), "5.139798");
/// assert_eq!(total.count(), 2);
/// ```
pub fn accumulate<I>(tokens: I, representation: Representation) -> Result<RunningTotal<Total>>
where
    I: IntoIterator,
    I::Item: AmountToken,
{
    match representation {
        Representation::FloatingPoint => {
            Ok(accumulate_as::<FloatingPoint, _>(tokens)?.map(Total::Float))
        }
        Representation::ExactDecimal => {
            Ok(accumulate_as::<ExactDecimal, _>(tokens)?.map(Total::Decimal))
        }
    }
}

/// Float and exact totals of one sequence, and how far apart they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepresentationComparison {
    pub float: f64,
    pub decimal: Decimal,
    /// `float - decimal`, using the exact binary value of `float`.
    pub drift: Decimal,
}

/// `float - decimal`, where `float` is taken at its exact binary value.
///
/// Fails with [`LedgerError::TotalOverflow`] if `float` is outside the
/// decimal range.
pub fn representation_drift(float: f64, decimal: Decimal) -> Result<Decimal> {
    Decimal::from_f64_retain(float)
        .and_then(|exact| exact.checked_sub(decimal))
        .ok_or(LedgerError::TotalOverflow {
            what: "representation drift",
        })
}

/// Sums the same sequence under both representations.
///
/// `source` is called once per representation and must yield the same tokens
/// in the same order each time. Float summation depends on order, so a
/// differently ordered second traversal would mix order error into the drift.
pub fn compare_representations<F, I>(mut source: F) -> Result<RepresentationComparison>
where
    F: FnMut() -> Result<I>,
    I: IntoIterator,
    I::Item: AmountToken,
{
    let float = accumulate_as::<FloatingPoint, _>(source()?)?;
    let decimal = accumulate_as::<ExactDecimal, _>(source()?)?;

    let drift = representation_drift(float.value(), decimal.value())?;

    debug!(
        "Representation drift over {} amounts: {}",
        decimal.count(),
        drift
    );
    Ok(RepresentationComparison {
        float: float.value(),
        decimal: decimal.value(),
        drift,
    })
}
