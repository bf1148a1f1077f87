//! Fee Ledger CLI
//!
//! Sums the amount column of a transaction CSV as floats and as exact
//! decimals, then totals the per-transaction fees under both rounding rules.
//! Writes a `metric,value` CSV summary to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv [fee_rate] [fraction_digits] > summary.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `trace` to control logging verbosity

use fee_ledger::{
    accumulate_as, representation_drift, AmountReader, ExactDecimal, FeeCalculator, FeeRate,
    FloatingPoint, FractionDigits, LedgerError, Result,
};
use log::info;
use serde::Serialize;
use std::env;
use std::io;
use std::process;
use std::time::{Duration, Instant};

#[derive(Serialize)]
struct SummaryRow {
    metric: &'static str,
    value: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(LedgerError::MissingArgument);
    }

    let input_path = &args[1];
    let rate = match args.get(2) {
        Some(raw) => parse_rate(raw)?,
        None => FeeRate::DEFAULT,
    };
    let digits = match args.get(3) {
        Some(raw) => parse_digits(raw)?,
        None => FractionDigits::DEFAULT,
    };
    let calculator = FeeCalculator::with(rate, digits);

    let (float, float_elapsed) =
        timed(|| accumulate_as::<FloatingPoint, _>(AmountReader::open(input_path)?))?;
    let (decimal, decimal_elapsed) =
        timed(|| accumulate_as::<ExactDecimal, _>(AmountReader::open(input_path)?))?;
    info!(
        "Summed {} amounts: float {:?}, decimal {:?}",
        decimal.count(),
        float_elapsed,
        decimal_elapsed
    );

    let drift = representation_drift(float.value(), decimal.value())?;
    let fees = calculator.compare_rounding(|| AmountReader::open(input_path))?;

    let rows = [
        row("amount_count", decimal.count()),
        row("float_total", float.value()),
        row("decimal_total", decimal.value()),
        row("representation_drift", drift),
        row("float_elapsed_ms", millis(float_elapsed)),
        row("decimal_elapsed_ms", millis(decimal_elapsed)),
        row(
            "decimal_overhead_pct",
            overhead_pct(float_elapsed, decimal_elapsed),
        ),
        row("fees_half_up", fees.half_up),
        row("fees_half_even", fees.half_even),
        row("rounding_difference", fees.difference),
    ];

    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());
    for r in &rows {
        writer.serialize(r)?;
    }
    writer.flush()?;

    Ok(())
}

fn parse_rate(raw: &str) -> Result<FeeRate> {
    match raw.parse::<FeeRate>() {
        Err(LedgerError::Parse { .. }) => Err(LedgerError::InvalidArgument {
            name: "fee_rate",
            value: raw.to_string(),
        }),
        other => other,
    }
}

fn parse_digits(raw: &str) -> Result<FractionDigits> {
    let digits: i64 = raw.trim().parse().map_err(|_| LedgerError::InvalidArgument {
        name: "fraction_digits",
        value: raw.to_string(),
    })?;
    FractionDigits::new(digits)
}

fn timed<T>(f: impl FnOnce() -> Result<T>) -> Result<(T, Duration)> {
    let start = Instant::now();
    let value = f()?;
    Ok((value, start.elapsed()))
}

fn row(metric: &'static str, value: impl ToString) -> SummaryRow {
    SummaryRow {
        metric,
        value: value.to_string(),
    }
}

fn millis(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64() * 1000.0)
}

fn overhead_pct(baseline: Duration, measured: Duration) -> String {
    let base = baseline.as_secs_f64();
    if base == 0.0 {
        return "n/a".to_string();
    }
    format!("{:.1}", (measured.as_secs_f64() - base) / base * 100.0)
}
