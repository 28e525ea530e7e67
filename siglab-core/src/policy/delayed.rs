//! Settlement-aware long-only policy (T+N).
//!
//! Identical decision rule to `LongOnly`; the difference is entirely in
//! execution, which the driver routes through the settlement ledger. Running
//! both on identical inputs isolates the effect of settlement friction on
//! the same signal stream.

use super::{Action, PeriodContext, TradingPolicy};

#[derive(Debug, Clone)]
pub struct DelayedLongOnly {
    threshold: f64,
    delay: usize,
    name: String,
}

impl DelayedLongOnly {
    pub fn new(threshold: f64, delay: usize) -> Self {
        Self {
            threshold,
            delay,
            name: format!("long_only_t{delay}"),
        }
    }
}

impl TradingPolicy for DelayedLongOnly {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, ctx: &PeriodContext) -> Action {
        if ctx.predicted_return > self.threshold && !ctx.holding {
            Action::Buy
        } else if ctx.predicted_return <= self.threshold && ctx.holding {
            Action::Sell
        } else {
            Action::Hold
        }
    }

    fn settlement_delay(&self) -> usize {
        self.delay
    }
}
