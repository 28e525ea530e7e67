//! Input loading for the runner.
//!
//! Two CSV formats, both date-keyed:
//! - price files: `date,close`
//! - signal files: `date,predicted_return`
//!
//! Prices may pass through an `unscale` hook when the upstream pipeline
//! normalized them. There is no download path; files come from disk, or the
//! seeded synthetic generator stands in for the `demo` subcommand and
//! integration tests.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use siglab_core::data::{PricePoint, SignalPoint};
use siglab_core::indicators::rsi;

/// Errors from the input layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("parsing {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no data rows")]
    Empty { path: String },
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    date: NaiveDate,
    close: f64,
}

#[derive(Debug, Deserialize)]
struct SignalRow {
    date: NaiveDate,
    predicted_return: f64,
}

/// Load a `date,close` CSV, applying `unscale` to each price if given.
pub fn load_price_csv(
    path: &Path,
    unscale: Option<&dyn Fn(f64) -> f64>,
) -> Result<Vec<PricePoint>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.display().to_string(),
        source,
    })?;
    let mut points = Vec::new();
    for row in reader.deserialize() {
        let row: PriceRow = row.map_err(|source| LoadError::Csv {
            path: path.display().to_string(),
            source,
        })?;
        let price = match unscale {
            Some(f) => f(row.close),
            None => row.close,
        };
        points.push(PricePoint {
            date: row.date,
            price,
        });
    }
    if points.is_empty() {
        return Err(LoadError::Empty {
            path: path.display().to_string(),
        });
    }
    Ok(points)
}

/// Load a `date,predicted_return` CSV.
pub fn load_signal_csv(path: &Path) -> Result<Vec<SignalPoint>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.display().to_string(),
        source,
    })?;
    let mut points = Vec::new();
    for row in reader.deserialize() {
        let row: SignalRow = row.map_err(|source| LoadError::Csv {
            path: path.display().to_string(),
            source,
        })?;
        points.push(SignalPoint {
            date: row.date,
            predicted_return: row.predicted_return,
        });
    }
    if points.is_empty() {
        return Err(LoadError::Empty {
            path: path.display().to_string(),
        });
    }
    Ok(points)
}

/// Synthetic inputs for demos and integration tests.
#[derive(Debug, Clone)]
pub struct DemoData {
    /// `periods + 1` points; the extra one lets the engine mark the final
    /// position at a real next-period price.
    pub prices: Vec<PricePoint>,
    pub signals: Vec<SignalPoint>,
    /// RSI(14) over the price path, NaN during warmup.
    pub oscillator: Vec<f64>,
}

/// Generate a seeded random-walk price series with min-max-scaled
/// one-step-ahead momentum signals.
///
/// The signals peek one step ahead on purpose: demo runs should show the
/// policies doing something, and the generator is only ever fed to demos
/// and tests. Weekends are skipped so dates look like a trading calendar.
pub fn generate_demo_data(seed: u64, periods: usize) -> DemoData {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let mut dates = Vec::with_capacity(periods + 1);
    let mut current = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    while dates.len() < periods + 1 {
        let weekday = current.weekday();
        if weekday != chrono::Weekday::Sat && weekday != chrono::Weekday::Sun {
            dates.push(current);
        }
        current += chrono::Duration::days(1);
    }

    let mut closes = Vec::with_capacity(periods + 1);
    let mut price = 100.0_f64;
    for _ in 0..=periods {
        closes.push(price);
        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        price *= 1.0 + daily_return;
    }

    // One-step-ahead momentum, min-max scaled into [0, 1].
    let raw: Vec<f64> = (0..periods)
        .map(|i| (closes[i + 1] - closes[i]) / closes[i])
        .collect();
    let min = raw.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = raw.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let scaled: Vec<f64> = raw
        .iter()
        .map(|&r| if span > 0.0 { (r - min) / span } else { 0.5 })
        .collect();

    let oscillator = rsi(&closes[..periods], 14);

    DemoData {
        prices: dates
            .iter()
            .zip(&closes)
            .map(|(&date, &price)| PricePoint { date, price })
            .collect(),
        signals: dates
            .iter()
            .zip(&scaled)
            .map(|(&date, &predicted_return)| SignalPoint {
                date,
                predicted_return,
            })
            .collect(),
        oscillator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_price_csv() {
        let file = write_csv("date,close\n2024-01-02,100.5\n2024-01-03,101.25\n");
        let points = load_price_csv(file.path(), None).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].price, 100.5);
        assert_eq!(
            points[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn unscale_hook_applies_to_every_price() {
        let file = write_csv("date,close\n2024-01-02,0.5\n2024-01-03,0.75\n");
        let unscale = |v: f64| v * 200.0;
        let points = load_price_csv(file.path(), Some(&unscale)).unwrap();
        assert_eq!(points[0].price, 100.0);
        assert_eq!(points[1].price, 150.0);
    }

    #[test]
    fn loads_signal_csv() {
        let file = write_csv("date,predicted_return\n2024-01-02,0.01\n2024-01-03,-0.02\n");
        let points = load_signal_csv(file.path()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].predicted_return, -0.02);
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = write_csv("date,close\n");
        let err = load_price_csv(file.path(), None).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn malformed_row_is_an_error() {
        let file = write_csv("date,close\n2024-01-02,not_a_number\n");
        assert!(load_price_csv(file.path(), None).is_err());
    }

    #[test]
    fn demo_data_is_deterministic() {
        let a = generate_demo_data(42, 60);
        let b = generate_demo_data(42, 60);
        assert_eq!(a.prices.len(), 61);
        assert_eq!(a.signals.len(), 60);
        assert_eq!(a.oscillator.len(), 60);
        for (pa, pb) in a.prices.iter().zip(&b.prices) {
            assert_eq!(pa.price, pb.price);
        }
        assert!(a.signals.iter().all(|s| {
            (0.0..=1.0).contains(&s.predicted_return)
        }));
    }

    #[test]
    fn demo_dates_skip_weekends() {
        let data = generate_demo_data(7, 20);
        for point in &data.prices {
            let weekday = point.date.weekday();
            assert_ne!(weekday, chrono::Weekday::Sat);
            assert_ne!(weekday, chrono::Weekday::Sun);
        }
    }
}
