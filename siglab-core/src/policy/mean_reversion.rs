//! Mean-reversion policy: dynamic threshold, oscillator filter, stop-loss.
//!
//! Three refinements over the simple rule:
//! - the neutral threshold becomes the rolling mean of the predicted-return
//!   stream (lookback default 30, at least `min_periods` observations before
//!   the rolling value is trusted, static neutral until then);
//! - an oscillator gate: buys need an oversold reading (< 40), sells need an
//!   overbought one (> 60);
//! - a stop-loss, executed by the driver before the decision runs.
//!
//! The rolling window is fed inside `decide`, so only signal values already
//! observed enter the threshold — no lookahead.

use super::{Action, PeriodContext, TradingPolicy};
use crate::engine::ConfigError;
use std::collections::VecDeque;

pub const DEFAULT_LOOKBACK: usize = 30;
pub const DEFAULT_MIN_PERIODS: usize = 10;
pub const DEFAULT_OVERSOLD: f64 = 40.0;
pub const DEFAULT_OVERBOUGHT: f64 = 60.0;
pub const DEFAULT_STOP_LOSS_PCT: f64 = 0.07;

#[derive(Debug, Clone)]
pub struct MeanReversion {
    neutral: f64,
    lookback: usize,
    min_periods: usize,
    oversold: f64,
    overbought: f64,
    stop_loss_pct: f64,
    window: VecDeque<f64>,
    window_sum: f64,
    name: String,
}

impl MeanReversion {
    /// Defaults: lookback 30, min periods 10, bands 40/60, stop-loss 7%.
    pub fn new(neutral: f64) -> Self {
        Self::with_params(
            neutral,
            DEFAULT_LOOKBACK,
            DEFAULT_MIN_PERIODS,
            DEFAULT_OVERSOLD,
            DEFAULT_OVERBOUGHT,
            DEFAULT_STOP_LOSS_PCT,
        )
        .expect("defaults are valid")
    }

    pub fn with_params(
        neutral: f64,
        lookback: usize,
        min_periods: usize,
        oversold: f64,
        overbought: f64,
        stop_loss_pct: f64,
    ) -> Result<Self, ConfigError> {
        if lookback < 1 {
            return Err(ConfigError::ZeroLookback(lookback));
        }
        if !(stop_loss_pct > 0.0 && stop_loss_pct < 1.0) {
            return Err(ConfigError::StopLossOutOfRange(stop_loss_pct));
        }
        if oversold >= overbought {
            return Err(ConfigError::OscillatorBandsInverted {
                oversold,
                overbought,
            });
        }
        Ok(Self {
            neutral,
            lookback,
            min_periods: min_periods.max(1),
            oversold,
            overbought,
            stop_loss_pct,
            window: VecDeque::with_capacity(lookback),
            window_sum: 0.0,
            name: "mean_reversion".to_string(),
        })
    }

    /// Rolling mean once enough observations exist, else the static neutral.
    fn dynamic_threshold(&self) -> f64 {
        if self.window.len() >= self.min_periods {
            self.window_sum / self.window.len() as f64
        } else {
            self.neutral
        }
    }

    fn observe(&mut self, predicted_return: f64) {
        self.window.push_back(predicted_return);
        self.window_sum += predicted_return;
        if self.window.len() > self.lookback {
            if let Some(old) = self.window.pop_front() {
                self.window_sum -= old;
            }
        }
    }
}

impl TradingPolicy for MeanReversion {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, ctx: &PeriodContext) -> Action {
        self.observe(ctx.predicted_return);
        let threshold = self.dynamic_threshold();

        // A missing oscillator reading (no series, or NaN warmup) leaves the
        // gate open and the signal rule alone decides.
        let osc = ctx.oscillator.filter(|v| !v.is_nan());
        let oversold = osc.map_or(true, |v| v < self.oversold);
        let overbought = osc.map_or(true, |v| v > self.overbought);

        if ctx.predicted_return > threshold && !ctx.holding && oversold {
            Action::Buy
        } else if ctx.predicted_return <= threshold && ctx.holding && overbought {
            Action::Sell
        } else {
            Action::Hold
        }
    }

    fn stop_loss_pct(&self) -> Option<f64> {
        Some(self.stop_loss_pct)
    }
}
