//! Error types for the fee ledger.

use crate::amount::AmountParseError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while folding an amount sequence.
///
/// Every variant aborts the fold it came from; no partial total is returned.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A token did not match the decimal grammar or could not be represented
    #[error("Invalid amount {token:?} at position {index}: {source}")]
    Parse {
        index: usize,
        token: String,
        #[source]
        source: AmountParseError,
    },

    /// Fee rate must be strictly positive
    #[error("Invalid fee rate {rate}: must be greater than zero")]
    InvalidRate { rate: Decimal },

    /// Fraction digits must be a non-negative integer
    #[error("Invalid precision {digits}: fraction digits must be non-negative")]
    InvalidPrecision { digits: i64 },

    /// Exact arithmetic exceeded the representable decimal range
    #[error("Arithmetic overflow at position {index}")]
    Overflow { index: usize },

    /// A figure derived from whole totals left the decimal range
    #[error("Arithmetic overflow computing {what}")]
    TotalOverflow { what: &'static str },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: fee-ledger <input.csv> [fee_rate] [fraction_digits]")]
    MissingArgument,

    /// Command-line argument that could not be parsed
    #[error("Invalid {name} argument: {value:?}")]
    InvalidArgument { name: &'static str, value: String },
}

impl LedgerError {
    pub(crate) fn parse(index: usize, token: &str, source: AmountParseError) -> Self {
        LedgerError::Parse {
            index,
            token: token.to_string(),
            source,
        }
    }

    /// Returns `true` for malformed-token errors.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, LedgerError::Parse { .. })
    }
}
