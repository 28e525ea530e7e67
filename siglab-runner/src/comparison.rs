//! Head-to-head comparison of finished runs.
//!
//! Verdicts are pure comparisons over already-computed metrics; swapping
//! the two sides never changes who wins, and exact ties have no winner.

use serde::{Deserialize, Serialize};

use crate::metrics::BacktestMetrics;

/// Which side won each judgment, by label. `None` on an exact tie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub higher_return: Option<String>,
    pub higher_sharpe: Option<String>,
    /// Drawdowns are ≤ 0; closer to zero is shallower.
    pub shallower_drawdown: Option<String>,
}

/// Two labeled metric sets and the verdict between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub label_a: String,
    pub label_b: String,
    pub verdict: Verdict,
}

impl StrategyComparison {
    pub fn new(
        label_a: &str,
        metrics_a: &BacktestMetrics,
        label_b: &str,
        metrics_b: &BacktestMetrics,
    ) -> Self {
        Self {
            label_a: label_a.to_string(),
            label_b: label_b.to_string(),
            verdict: Verdict {
                higher_return: pick_greater(
                    label_a,
                    metrics_a.total_return_pct,
                    label_b,
                    metrics_b.total_return_pct,
                ),
                higher_sharpe: pick_greater(
                    label_a,
                    metrics_a.sharpe_ratio,
                    label_b,
                    metrics_b.sharpe_ratio,
                ),
                shallower_drawdown: pick_greater(
                    label_a,
                    metrics_a.max_drawdown_pct,
                    label_b,
                    metrics_b.max_drawdown_pct,
                ),
            },
        }
    }
}

fn pick_greater(label_a: &str, a: f64, label_b: &str, b: f64) -> Option<String> {
    if a > b {
        Some(label_a.to_string())
    } else if b > a {
        Some(label_b.to_string())
    } else {
        None
    }
}

/// One labeled row of a comparison table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub label: String,
    pub metrics: BacktestMetrics,
}

/// Two or more labeled metric records, ready for rendering.
///
/// By convention the last row is the passive baseline; `against_baseline`
/// compares every other row to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &str, metrics: BacktestMetrics) {
        self.rows.push(ComparisonRow {
            label: label.to_string(),
            metrics,
        });
    }

    /// Verdicts of every row versus the last (baseline) row.
    pub fn against_baseline(&self) -> Vec<StrategyComparison> {
        let Some(baseline) = self.rows.last() else {
            return Vec::new();
        };
        self.rows[..self.rows.len() - 1]
            .iter()
            .map(|row| {
                StrategyComparison::new(
                    &row.label,
                    &row.metrics,
                    &baseline.label,
                    &baseline.metrics,
                )
            })
            .collect()
    }
}
