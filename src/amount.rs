//! Decimal amount tokens and their two parse targets.
//!
//! A token is checked against one grammar before it is converted, so the
//! float and exact-decimal paths accept and reject exactly the same inputs:
//!
//! ```text
//! token := ws* [+-]? digit* ('.' digit*)? ws*     (at least one digit)
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a single token cannot become an amount.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("empty amount")]
    Empty,

    #[error("not a plain decimal number")]
    Malformed,

    #[error("value cannot be represented exactly")]
    OutOfRange,
}

/// A token that passed the grammar check, split into its parts.
#[derive(Debug, Clone, Copy)]
struct Lexeme<'a> {
    text: &'a str,
    negative: bool,
    int_digits: &'a str,
    frac_digits: &'a str,
}

fn lex(token: &str) -> Result<Lexeme<'_>, AmountParseError> {
    let text = token.trim();
    if text.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (int_digits, frac_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_digits)
        || !is_digits(frac_digits)
        || (int_digits.is_empty() && frac_digits.is_empty())
    {
        return Err(AmountParseError::Malformed);
    }

    Ok(Lexeme {
        text,
        negative,
        int_digits,
        frac_digits,
    })
}

/// Parses a token into an exact decimal.
///
/// Digits are accumulated into an integer mantissa with the fractional digit
/// count as scale, so no binary conversion ever happens. Values that do not
/// fit `Decimal` are rejected rather than rounded.
///
/// # Examples
///
/// ```
/// use fee_ledger::amount::parse_decimal;
///
/// let amount = parse_decimal("-11.022038").unwrap();
/// assert_eq!(amount.to_string(), "-11.022038");
/// assert!(parse_decimal("12.3.4").is_err());
/// ```
pub fn parse_decimal(token: &str) -> Result<Decimal, AmountParseError> {
    let lexeme = lex(token)?;

    // Trailing fractional zeros carry no value; drop them only when the
    // literal form does not fit.
    exact_decimal(lexeme.negative, lexeme.int_digits, lexeme.frac_digits)
        .or_else(|| {
            let significant = lexeme.frac_digits.trim_end_matches('0');
            exact_decimal(lexeme.negative, lexeme.int_digits, significant)
        })
        .ok_or(AmountParseError::OutOfRange)
}

/// `int_digits.frac_digits` as a `Decimal`, or `None` if it does not fit.
fn exact_decimal(negative: bool, int_digits: &str, frac_digits: &str) -> Option<Decimal> {
    let scale = u32::try_from(frac_digits.len()).ok()?;

    let mut mantissa: i128 = 0;
    for digit in int_digits.bytes().chain(frac_digits.bytes()) {
        mantissa = mantissa
            .checked_mul(10)?
            .checked_add(i128::from(digit - b'0'))?;
    }
    if negative {
        mantissa = -mantissa;
    }

    Decimal::try_from_i128_with_scale(mantissa, scale).ok()
}

/// Parses a token into a binary float.
///
/// Accepts the same grammar as [`parse_decimal`]; results that overflow to
/// infinity are rejected.
pub fn parse_float(token: &str) -> Result<f64, AmountParseError> {
    let lexeme = lex(token)?;
    let value: f64 = lexeme
        .text
        .parse()
        .map_err(|_| AmountParseError::Malformed)?;
    if !value.is_finite() {
        return Err(AmountParseError::OutOfRange);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_decimal_keeps_scale() {
        assert_eq!(parse_decimal("-11.022038").unwrap().to_string(), "-11.022038");
        assert_eq!(parse_decimal("16.161836").unwrap().to_string(), "16.161836");
        assert_eq!(parse_decimal("1.50").unwrap().to_string(), "1.50");
        assert_eq!(parse_decimal("42").unwrap().to_string(), "42");
    }

    #[test]
    fn test_parse_decimal_sign_and_whitespace() {
        assert_eq!(parse_decimal("  +2.5  ").unwrap(), Decimal::from_str("2.5").unwrap());
        assert_eq!(parse_decimal("-0").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("5.").unwrap(), Decimal::from(5));
        assert_eq!(parse_decimal(".5").unwrap(), Decimal::from_str("0.5").unwrap());
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["abc", "12.3.4", "-", ".", "+-1", "1e5", "1,000", "NaN", "inf", "1 2"] {
            assert_eq!(parse_decimal(token), Err(AmountParseError::Malformed), "{token}");
            assert_eq!(parse_float(token), Err(AmountParseError::Malformed), "{token}");
        }
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(parse_decimal(""), Err(AmountParseError::Empty));
        assert_eq!(parse_float("   "), Err(AmountParseError::Empty));
    }

    #[test]
    fn test_decimal_out_of_range() {
        // 29 significant fractional digits
        assert_eq!(
            parse_decimal("0.00000000000000000000000000001"),
            Err(AmountParseError::OutOfRange)
        );
        // 2^96
        assert_eq!(
            parse_decimal("79228162514264337593543950336"),
            Err(AmountParseError::OutOfRange)
        );
    }

    #[test]
    fn test_trailing_zeros_beyond_max_scale() {
        let d = parse_decimal("0.100000000000000000000000000000000").unwrap();
        assert_eq!(d, Decimal::from_str("0.1").unwrap());
    }

    #[test]
    fn test_trailing_zeros_overflowing_mantissa() {
        // 28 zeros fits the scale but not the 96-bit mantissa
        let short = format!("10.{}", "0".repeat(28));
        let long = format!("10.{}", "0".repeat(29));
        assert_eq!(parse_decimal(&short), Ok(Decimal::from(10)));
        assert_eq!(parse_decimal(&long), Ok(Decimal::from(10)));
        assert_eq!(
            parse_decimal(&format!("-7.5{}", "0".repeat(40))),
            Ok(Decimal::from_str("-7.5").unwrap())
        );
    }

    #[test]
    fn test_significant_digits_still_out_of_range() {
        let token = format!("10.{}1", "0".repeat(27));
        assert_eq!(parse_decimal(&token), Err(AmountParseError::OutOfRange));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("-11.022038").unwrap(), -11.022038);
        assert_eq!(parse_float("+3").unwrap(), 3.0);
        assert_eq!(parse_float("7.").unwrap(), 7.0);
    }

    #[test]
    fn test_float_overflow_rejected() {
        let huge = "9".repeat(400);
        assert_eq!(parse_float(&huge), Err(AmountParseError::OutOfRange));
    }
}
