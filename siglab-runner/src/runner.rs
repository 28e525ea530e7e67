//! Backtest orchestration — wires config, engine, metrics, and comparison.
//!
//! Two entry points:
//! - `run_single()`: validate, build the policy, simulate, compute metrics.
//! - `run_comparison()`: independent runs in parallel, then a comparison
//!   table with a buy-and-hold baseline appended.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use siglab_core::baseline::run_buy_and_hold;
use siglab_core::data::{AlignError, AlignedSeries};
use siglab_core::domain::TradeRecord;
use siglab_core::engine::{run_policy, ConfigError, PolicyRun};
use siglab_core::indicators::rsi;

use crate::comparison::ComparisonTable;
use crate::config::{PolicyConfig, RunConfig, RunId};
use crate::data_loader::LoadError;
use crate::metrics::BacktestMetrics;

/// RSI period used when a mean-reversion run has no supplied oscillator.
pub const DERIVED_OSCILLATOR_PERIOD: usize = 14;

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("alignment error: {0}")]
    Align(#[from] AlignError),

    #[error("data error: {0}")]
    Data(#[from] LoadError),

    #[error("comparison needs at least one configured run")]
    EmptyComparison,
}

/// Complete, serializable result of a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub label: String,
    pub config: RunConfig,
    pub metrics: BacktestMetrics,
    pub trajectory: Vec<f64>,
    pub trades: Vec<TradeRecord>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Everything `run_comparison` produces: one result per config, the
/// baseline run, and the rendered-ready table (baseline last).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub results: Vec<BacktestResult>,
    pub baseline: BacktestResult,
    pub table: ComparisonTable,
}

/// Run one configured backtest over an aligned series.
pub fn run_single(config: &RunConfig, series: &AlignedSeries) -> Result<BacktestResult, RunError> {
    config.validate()?;
    let engine_config = config.engine_config()?;

    let needs_oscillator = matches!(config.policy, PolicyConfig::MeanReversion { .. });
    let run: PolicyRun = match config.build_policy()? {
        Some(mut policy) => {
            if needs_oscillator && series.oscillator.is_none() {
                let enriched = with_derived_oscillator(series);
                run_policy(&engine_config, policy.as_mut(), &enriched)?
            } else {
                run_policy(&engine_config, policy.as_mut(), series)?
            }
        }
        None => run_buy_and_hold(&engine_config, series)?,
    };

    let metrics = BacktestMetrics::compute(&run, config.initial_capital, config.periods_per_year);
    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        label: run.label,
        config: config.clone(),
        metrics,
        trajectory: run.trajectory,
        trades: run.trades,
    })
}

/// Run every config in parallel, then table them against buy-and-hold.
///
/// The baseline inherits capital, commission, and annualization from the
/// first config, so the comparison is money-for-money. Runs share nothing
/// but the read-only series.
pub fn run_comparison(
    configs: &[RunConfig],
    series: &AlignedSeries,
) -> Result<ComparisonOutcome, RunError> {
    let first = configs.first().ok_or(RunError::EmptyComparison)?;

    let results: Vec<BacktestResult> = configs
        .par_iter()
        .map(|config| run_single(config, series))
        .collect::<Result<_, _>>()?;

    let baseline_config = RunConfig {
        policy: PolicyConfig::BuyAndHold,
        ..first.clone()
    };
    let baseline = run_single(&baseline_config, series)?;

    let mut table = ComparisonTable::new();
    for result in &results {
        table.push(&result.label, result.metrics.clone());
    }
    table.push(&baseline.label, baseline.metrics.clone());

    Ok(ComparisonOutcome {
        results,
        baseline,
        table,
    })
}

/// Clone the series with an RSI oscillator derived from its own prices.
fn with_derived_oscillator(series: &AlignedSeries) -> AlignedSeries {
    let mut enriched = series.clone();
    enriched.oscillator = Some(rsi(&series.prices, DERIVED_OSCILLATOR_PERIOD));
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_series(prices: &[f64], signals: &[f64]) -> AlignedSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let n = signals.len();
        AlignedSeries {
            dates: (0..n)
                .map(|i| base + chrono::Duration::days(i as i64))
                .collect(),
            prices: prices[..n].to_vec(),
            signals: signals.to_vec(),
            oscillator: None,
            tail_price: prices.get(n).copied(),
        }
    }

    fn long_only_config() -> RunConfig {
        RunConfig {
            initial_capital: 100_000.0,
            commission_rate: 0.0,
            periods_per_year: 252.0,
            liquidate_at_end: false,
            policy: PolicyConfig::LongOnly { threshold: 0.5 },
        }
    }

    #[test]
    fn run_single_produces_metrics_and_trades() {
        let series = make_series(&[100.0, 110.0, 90.0, 130.0], &[0.9, 0.9, 0.1]);
        let result = run_single(&long_only_config(), &series).unwrap();

        assert_eq!(result.schema_version, SCHEMA_VERSION);
        assert_eq!(result.label, "long_only");
        assert_eq!(result.trajectory.len(), 4);
        assert_eq!(result.metrics.num_trades, 2);
        assert!((result.metrics.total_return_pct - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn run_single_rejects_bad_config_before_simulating() {
        let series = make_series(&[100.0, 110.0], &[0.9]);
        let mut config = long_only_config();
        config.commission_rate = 1.0;
        assert!(matches!(
            run_single(&config, &series),
            Err(RunError::Config(ConfigError::CommissionOutOfRange(_)))
        ));
    }

    #[test]
    fn mean_reversion_gets_a_derived_oscillator() {
        // Oscillator-free series still runs; the gate sees derived RSI
        // (NaN during warmup, which leaves it open).
        let series = make_series(&[100.0, 92.0, 95.0], &[0.9, 0.9]);
        let config = RunConfig {
            policy: PolicyConfig::MeanReversion {
                neutral_threshold: 0.5,
                lookback_window: 30,
                min_periods: 10,
                oversold: 40.0,
                overbought: 60.0,
                stop_loss_pct: 0.07,
            },
            ..long_only_config()
        };
        let result = run_single(&config, &series).unwrap();
        assert_eq!(result.label, "mean_reversion");
        assert_eq!(result.metrics.num_trades, 2);
    }

    #[test]
    fn comparison_appends_baseline_last() {
        let series = make_series(&[100.0, 110.0, 90.0, 130.0], &[0.9, 0.9, 0.1]);
        let configs = vec![
            long_only_config(),
            RunConfig {
                policy: PolicyConfig::DelayedLongOnly {
                    threshold: 0.5,
                    settlement_delay: 2,
                },
                ..long_only_config()
            },
        ];
        let outcome = run_comparison(&configs, &series).unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.table.rows.len(), 3);
        assert_eq!(outcome.table.rows.last().unwrap().label, "buy_and_hold");
        assert_eq!(outcome.baseline.metrics.num_trades, 2);
    }

    #[test]
    fn comparison_of_nothing_is_an_error() {
        let series = make_series(&[100.0, 110.0], &[0.9]);
        assert!(matches!(
            run_comparison(&[], &series),
            Err(RunError::EmptyComparison)
        ));
    }

    #[test]
    fn result_json_round_trips() {
        let series = make_series(&[100.0, 110.0, 90.0, 130.0], &[0.9, 0.9, 0.1]);
        let result = run_single(&long_only_config(), &series).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: BacktestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.run_id, result.run_id);
        assert_eq!(back.trajectory, result.trajectory);
        assert_eq!(back.trades.len(), result.trades.len());
    }
}
