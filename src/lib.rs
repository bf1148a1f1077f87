//! # Fee Ledger
//!
//! Streaming totals and per-transaction fees over a feed of decimal amount
//! strings.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: amounts parse straight into `rust_decimal` without
//!   passing through binary floats
//! - **Streaming folds**: any iterator of tokens, consumed once, in order
//! - **Explicit rounding**: the rounding rule is a parameter, never ambient state
//! - **No partial results**: a malformed token fails the whole fold
//!
//! ## Example
//!
//! ```
//! use fee_ledger::{accumulate, compute_fees, Representation, RoundingRule};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let tokens = ["-11.022038", "-56.825416", "16.161836"];
//!
//! let total = accumulate(tokens, Representation::ExactDecimal).unwrap();
//! assert_eq!(total.value().to_string(), "-51.685618");
//!
//! let rate = Decimal::from_str("0.00123").unwrap();
//! let fees = compute_fees(tokens, rate, RoundingRule::HalfUp, 8).unwrap();
//! assert_eq!(fees.value().to_string(), "0.10333143");
//! ```

pub mod accumulator;
pub mod amount;
pub mod error;
pub mod fee;
pub mod reader;
pub mod rounding;
pub mod total;

pub use accumulator::{
    accumulate, accumulate_as, compare_representations, representation_drift, ExactDecimal,
    FloatingPoint, NumericRepresentation, Representation, RepresentationComparison, Total,
};
pub use amount::AmountParseError;
pub use error::{LedgerError, Result};
pub use fee::{
    compare_rounding, compute_fees, fee_for, FeeCalculator, FeeRate, FractionDigits,
    RoundingComparison,
};
pub use reader::AmountReader;
pub use rounding::RoundingRule;
pub use total::{AmountToken, RunningTotal};
