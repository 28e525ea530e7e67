//! Performance metrics — pure functions over a portfolio trajectory.
//!
//! Every metric is a pure function: trajectory and/or trade list in, scalar
//! out. Degenerate inputs (empty, single point, zero variance) produce 0.0
//! rather than errors, so a run over pathological data still reports.

use serde::{Deserialize, Serialize};
use siglab_core::domain::TradeRecord;
use siglab_core::engine::PolicyRun;

/// Default annualization factor: trading days per year.
pub const DEFAULT_PERIODS_PER_YEAR: f64 = 252.0;

/// Aggregate metrics for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestMetrics {
    pub total_return_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    /// Percentage of periods with a positive return.
    pub win_rate_pct: f64,
    /// Percentage of closed trades with a positive net P&L.
    pub trade_win_rate_pct: f64,
    pub num_trades: usize,
    pub total_commission: f64,
    pub final_capital: f64,
}

impl BacktestMetrics {
    /// Compute all metrics from a finished run.
    pub fn compute(run: &PolicyRun, initial_capital: f64, periods_per_year: f64) -> Self {
        let returns = period_returns(&run.trajectory);
        Self {
            total_return_pct: total_return_pct(&run.trajectory, initial_capital),
            sharpe_ratio: sharpe_ratio(&returns, periods_per_year),
            max_drawdown_pct: max_drawdown_pct(&run.trajectory),
            win_rate_pct: win_rate_pct(&returns),
            trade_win_rate_pct: trade_win_rate_pct(&run.trades),
            num_trades: run.num_trades(),
            total_commission: run.total_commission,
            final_capital: run.final_value,
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return in percent: (final / initial - 1) × 100.
pub fn total_return_pct(trajectory: &[f64], initial_capital: f64) -> f64 {
    match trajectory.last() {
        Some(&final_value) if initial_capital > 0.0 => {
            (final_value / initial_capital - 1.0) * 100.0
        }
        _ => 0.0,
    }
}

/// Simple percent-change returns; length = trajectory length − 1.
///
/// A zero-valued point yields a 0.0 return for the following step rather
/// than an infinity.
pub fn period_returns(trajectory: &[f64]) -> Vec<f64> {
    if trajectory.len() < 2 {
        return Vec::new();
    }
    trajectory
        .windows(2)
        .map(|w| if w[0] != 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

/// Annualized Sharpe ratio: mean(returns) / std(returns) × sqrt(factor).
///
/// Uses the population standard deviation. Returns 0.0 for fewer than 2
/// returns or zero variance.
pub fn sharpe_ratio(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.len() < 2 || periods_per_year <= 0.0 {
        return 0.0;
    }
    let mean = mean_f64(returns);
    let std = population_std(returns);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * periods_per_year.sqrt()
}

/// Maximum drawdown in percent, ≤ 0 by construction.
///
/// The running peak includes the current point, so a non-decreasing
/// trajectory reports exactly 0.0.
pub fn max_drawdown_pct(trajectory: &[f64]) -> f64 {
    if trajectory.len() < 2 {
        return 0.0;
    }
    let mut peak = trajectory[0];
    let mut max_dd = 0.0_f64;
    for &value in trajectory {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (value - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd * 100.0
}

/// Percentage of periods with a positive return. Exactly 0.0 for an empty
/// return series.
pub fn win_rate_pct(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let winners = returns.iter().filter(|&&r| r > 0.0).count();
    winners as f64 / returns.len() as f64 * 100.0
}

/// Percentage of closed trades (Sell or StopLoss exits) with positive net
/// P&L. 0.0 when no trade ever closed.
pub fn trade_win_rate_pct(trades: &[TradeRecord]) -> f64 {
    let exits: Vec<_> = trades.iter().filter(|t| t.action.is_exit()).collect();
    if exits.is_empty() {
        return 0.0;
    }
    let winners = exits.iter().filter(|t| t.is_winner()).count();
    winners as f64 / exits.len() as f64 * 100.0
}

// ─── Helpers ────────────────────────────────────────────────────────

fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
