//! Simple long-only policy.
//!
//! Buy when the predicted return clears the neutral threshold and the run is
//! flat; sell when it falls to or below the threshold while holding. `>` for
//! buy and `<=` for sell are complementary, so no period is eligible for
//! both; the holding guard decides which side applies.

use super::{Action, PeriodContext, TradingPolicy};

#[derive(Debug, Clone)]
pub struct LongOnly {
    threshold: f64,
    name: String,
}

impl LongOnly {
    /// `threshold` is the neutral point of the caller's predicted-return
    /// scale (0.5 for min-max-scaled predictions, 0.0 for raw log returns).
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            name: "long_only".to_string(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl TradingPolicy for LongOnly {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pred: f64, holding: bool) -> PeriodContext {
        PeriodContext {
            period: 0,
            predicted_return: pred,
            price: 100.0,
            oscillator: None,
            holding,
        }
    }

    #[test]
    fn buys_above_threshold_when_flat() {
        let mut policy = LongOnly::new(0.5);
        assert_eq!(policy.decide(&ctx(0.9, false)), Action::Buy);
    }

    #[test]
    fn sells_at_or_below_threshold_when_holding() {
        let mut policy = LongOnly::new(0.5);
        assert_eq!(policy.decide(&ctx(0.5, true)), Action::Sell);
        assert_eq!(policy.decide(&ctx(0.1, true)), Action::Sell);
    }

    #[test]
    fn holds_otherwise() {
        let mut policy = LongOnly::new(0.5);
        // Above threshold but already holding.
        assert_eq!(policy.decide(&ctx(0.9, true)), Action::Hold);
        // At or below threshold but flat: selling with no shares is a no-op.
        assert_eq!(policy.decide(&ctx(0.2, false)), Action::Hold);
    }

    #[test]
    fn threshold_boundary_is_a_sell_not_a_buy() {
        let mut policy = LongOnly::new(0.5);
        assert_eq!(policy.decide(&ctx(0.5, false)), Action::Hold);
        assert_eq!(policy.decide(&ctx(0.5, true)), Action::Sell);
    }

    #[test]
    fn no_settlement_delay_or_stop_loss() {
        let policy = LongOnly::new(0.5);
        assert_eq!(policy.settlement_delay(), 0);
        assert_eq!(policy.stop_loss_pct(), None);
    }
}
