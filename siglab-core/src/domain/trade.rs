//! TradeRecord — an immutable, append-only trade log entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the engine did at a period boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
    /// Forced liquidation: the open position breached the stop-loss floor.
    StopLoss,
}

impl TradeAction {
    /// Whether this action closes a position.
    pub fn is_exit(self) -> bool {
        matches!(self, TradeAction::Sell | TradeAction::StopLoss)
    }
}

/// One executed trade. Appended once, never mutated, retained for the life
/// of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    /// 0-based period index within the run.
    pub period: usize,
    pub action: TradeAction,
    /// Execution price.
    pub price: f64,
    pub shares: u64,
    pub commission: f64,
    /// Settled cash immediately after this trade was booked.
    pub cash_after: f64,
    /// Period at which the proceeds become available (T+N runs only).
    pub settles_at: Option<usize>,
    /// Net P&L of the round trip, populated on exits.
    pub pnl: Option<f64>,
}

impl TradeRecord {
    pub fn is_winner(&self) -> bool {
        self.pnl.is_some_and(|p| p > 0.0)
    }
}
