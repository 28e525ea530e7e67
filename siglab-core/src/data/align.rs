//! Date-key alignment of signal, price, and oscillator series.
//!
//! The engine consumes a prediction and a price for each common date, plus the
//! price one date past the last common date (when the price source has one) to
//! value the final position. A run with no common dates is a configuration
//! error — nothing is simulated.

use super::series::{OscillatorPoint, PricePoint, SignalPoint};
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

/// Alignment failures. All are fatal and occur before any simulation.
#[derive(Debug, Error, PartialEq)]
pub enum AlignError {
    #[error("price series is empty")]
    EmptyPrices,
    #[error("signal series is empty")]
    EmptySignals,
    #[error("price and signal series share no common dates")]
    EmptyIntersection,
    #[error("non-positive price {price} at {date}")]
    NonPositivePrice { date: NaiveDate, price: f64 },
    #[error("series not strictly date-ordered at {date}")]
    OutOfOrder { date: NaiveDate },
}

/// Signal, price, and optional oscillator series on a common date axis.
///
/// `dates`, `prices`, `signals` (and `oscillator` when present) all have the
/// same length N. `tail_price` is the price one date past the last common
/// date, used to mark the final period's position; when the price source
/// ends at the last common date, the final period marks at its own price.
#[derive(Debug, Clone)]
pub struct AlignedSeries {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    pub signals: Vec<f64>,
    pub oscillator: Option<Vec<f64>>,
    pub tail_price: Option<f64>,
}

impl AlignedSeries {
    /// Number of tradeable periods.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Price used to mark period `i`'s position to market: the next period's
    /// price when one exists, else the tail price, else period `i`'s own.
    pub fn mark_price(&self, i: usize) -> f64 {
        if i + 1 < self.prices.len() {
            self.prices[i + 1]
        } else {
            self.tail_price.unwrap_or(self.prices[i])
        }
    }
}

/// Intersect the series on their date keys.
///
/// Alignment matches the upstream contract: the signal source and price
/// source may cover different ranges; only dates present in both are
/// simulated. Oscillator values are picked per common date where available
/// (a missing date yields NaN, which policies treat as "no reading").
pub fn align_series(
    prices: &[PricePoint],
    signals: &[SignalPoint],
    oscillator: Option<&[OscillatorPoint]>,
) -> Result<AlignedSeries, AlignError> {
    if prices.is_empty() {
        return Err(AlignError::EmptyPrices);
    }
    if signals.is_empty() {
        return Err(AlignError::EmptySignals);
    }
    check_ordered(prices.iter().map(|p| p.date))?;
    check_ordered(signals.iter().map(|s| s.date))?;
    for p in prices {
        if !(p.price > 0.0) {
            return Err(AlignError::NonPositivePrice {
                date: p.date,
                price: p.price,
            });
        }
    }

    let price_by_date: HashMap<NaiveDate, f64> =
        prices.iter().map(|p| (p.date, p.price)).collect();
    let osc_by_date: HashMap<NaiveDate, f64> = oscillator
        .unwrap_or(&[])
        .iter()
        .map(|o| (o.date, o.value))
        .collect();

    let mut dates = Vec::new();
    let mut aligned_prices = Vec::new();
    let mut aligned_signals = Vec::new();
    let mut aligned_osc = Vec::new();
    for s in signals {
        if let Some(&price) = price_by_date.get(&s.date) {
            dates.push(s.date);
            aligned_prices.push(price);
            aligned_signals.push(s.predicted_return);
            aligned_osc.push(osc_by_date.get(&s.date).copied().unwrap_or(f64::NAN));
        }
    }

    if dates.is_empty() {
        return Err(AlignError::EmptyIntersection);
    }

    // Price one date past the last common date, if the price source has one.
    let last = dates[dates.len() - 1];
    let tail_price = prices
        .iter()
        .find(|p| p.date > last)
        .map(|p| p.price);

    Ok(AlignedSeries {
        dates,
        prices: aligned_prices,
        signals: aligned_signals,
        oscillator: oscillator.map(|_| aligned_osc),
        tail_price,
    })
}

fn check_ordered(dates: impl Iterator<Item = NaiveDate>) -> Result<(), AlignError> {
    let mut prev: Option<NaiveDate> = None;
    for date in dates {
        if let Some(p) = prev {
            if date <= p {
                return Err(AlignError::OutOfOrder { date });
            }
        }
        prev = Some(date);
    }
    Ok(())
}
