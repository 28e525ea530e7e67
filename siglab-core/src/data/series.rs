//! Per-period input points, keyed by date.
//!
//! The predicted-return scale is caller-defined: a min-max-scaled model emits
//! 0.5 as "neutral", a raw log-return model emits 0.0. The engine never
//! assumes a scale — the neutral threshold is explicit configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Realized closing price for one period. Prices are in natural units;
/// normalized upstream data must be unscaled before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Model-predicted return for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub predicted_return: f64,
}

/// Auxiliary oscillator reading for one period, bounded [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorPoint {
    pub date: NaiveDate,
    pub value: f64,
}
