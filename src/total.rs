//! Running totals and the fold that produces them.

use crate::error::{LedgerError, Result};
use log::trace;

/// The state of one accumulation: a value and how many items went into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningTotal<V> {
    value: V,
    count: usize,
}

impl<V: Copy> RunningTotal<V> {
    /// The accumulated value.
    pub fn value(&self) -> V {
        self.value
    }

    /// Number of amounts folded into the total.
    pub fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn map<W>(self, f: impl FnOnce(V) -> W) -> RunningTotal<W> {
        RunningTotal {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// One item of an amount sequence.
///
/// Plain strings are always available; `Result` items let a fallible source
/// (such as [`AmountReader`](crate::reader::AmountReader)) abort the fold with
/// its own error.
pub trait AmountToken {
    type Text: AsRef<str>;

    fn into_token(self) -> Result<Self::Text>;
}

impl<'a> AmountToken for &'a str {
    type Text = &'a str;

    fn into_token(self) -> Result<Self::Text> {
        Ok(self)
    }
}

impl<'a> AmountToken for &'a String {
    type Text = &'a str;

    fn into_token(self) -> Result<Self::Text> {
        Ok(self.as_str())
    }
}

impl AmountToken for String {
    type Text = String;

    fn into_token(self) -> Result<Self::Text> {
        Ok(self)
    }
}

impl<T: AsRef<str>> AmountToken for std::result::Result<T, LedgerError> {
    type Text = T;

    fn into_token(self) -> Result<Self::Text> {
        self
    }
}

/// Folds `tokens` left to right, starting from `zero`.
///
/// `step` receives the position of the token, the total so far, and the
/// token text. The first error from the source or from `step` is returned and
/// the partial total is dropped.
pub(crate) fn fold_tokens<I, V, F>(tokens: I, zero: V, mut step: F) -> Result<RunningTotal<V>>
where
    I: IntoIterator,
    I::Item: AmountToken,
    F: FnMut(usize, V, &str) -> Result<V>,
{
    let mut total = RunningTotal {
        value: zero,
        count: 0,
    };

    for (index, item) in tokens.into_iter().enumerate() {
        let token = item.into_token()?;
        let token = token.as_ref();
        trace!("Folding amount {:?} at position {}", token, index);
        total.value = step(index, total.value, token)?;
        total.count += 1;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_counts_items() {
        let total = fold_tokens(["1", "2", "3"], 0u64, |_, acc, t| Ok(acc + t.len() as u64)).unwrap();
        assert_eq!(total.value(), 3);
        assert_eq!(total.count(), 3);
    }

    #[test]
    fn test_empty_sequence() {
        let tokens: Vec<String> = Vec::new();
        let total = fold_tokens(&tokens, 7i32, |_, acc, _| Ok(acc)).unwrap();
        assert_eq!(total.value(), 7);
        assert_eq!(total.count(), 0);
    }

    #[test]
    fn test_source_error_aborts() {
        let tokens: Vec<Result<&str>> = vec![
            Ok("1"),
            Err(LedgerError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "truncated input",
            ))),
            Ok("2"),
        ];
        let mut seen = 0;
        let result = fold_tokens(tokens, 0, |_, acc, _| {
            seen += 1;
            Ok(acc + 1)
        });
        assert!(matches!(result, Err(LedgerError::Io(_))));
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_step_receives_positions() {
        let mut positions = Vec::new();
        fold_tokens(vec!["a".to_string(), "b".to_string()], (), |i, _, _| {
            positions.push(i);
            Ok(())
        })
        .unwrap();
        assert_eq!(positions, vec![0, 1]);
    }
}
