//! Position — mutable state owned by exactly one engine run.

use serde::{Deserialize, Serialize};

/// Cash and share state for a single-instrument, long-only run.
///
/// `shares_held` counts settled, tradeable shares only; unsettled shares live
/// in the settlement ledger. Invariant: `shares_held >= 0` by construction
/// (unsigned), and `entry_price`/`entry_cost` are set while a position is
/// open and cleared on any exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub cash: f64,
    pub shares_held: u64,
    /// Execution price of the open position's entry, for stop-loss tracking.
    pub entry_price: Option<f64>,
    /// Full entry cost including commission, for trade-level P&L.
    pub entry_cost: f64,
}

impl Position {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            cash: initial_capital,
            shares_held: 0,
            entry_price: None,
            entry_cost: 0.0,
        }
    }

    /// Whether any settled shares are held.
    pub fn is_holding(&self) -> bool {
        self.shares_held > 0
    }

    /// Record an entry: debit cash, set entry tracking.
    ///
    /// Shares are credited separately — immediately for T+0, via the
    /// settlement ledger for T+N.
    pub fn open(&mut self, price: f64, shares: u64, commission: f64) {
        let cost = shares as f64 * price;
        self.cash -= cost + commission;
        self.entry_price = Some(price);
        self.entry_cost = cost + commission;
    }

    /// Clear entry tracking on any exit (Sell or StopLoss).
    pub fn clear_entry(&mut self) {
        self.entry_price = None;
        self.entry_cost = 0.0;
    }
}
