//! Streaming CSV source of amount tokens.
//!
//! Reads one record at a time, skips the header row, and yields the last
//! field of each record. Nothing is parsed as a number here.

use crate::error::{LedgerError, Result};
use csv::{ReaderBuilder, StringRecordsIntoIter, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Iterator over the amount field of each CSV record.
pub struct AmountReader<R: Read> {
    records: StringRecordsIntoIter<R>,
}

impl<R: Read> AmountReader<R> {
    /// Wraps a reader whose first line is a header row.
    pub fn new(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        AmountReader { records }
    }
}

impl AmountReader<BufReader<File>> {
    /// Opens a CSV file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(AmountReader::new(BufReader::new(file)))
    }
}

impl<R: Read> Iterator for AmountReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        // An empty amount field comes through as "" and fails to parse
        let item = match self.records.next()? {
            Ok(record) => Ok(record.iter().last().unwrap_or_default().to_string()),
            Err(e) => Err(LedgerError::Csv(e)),
        };
        Some(item)
    }
}
