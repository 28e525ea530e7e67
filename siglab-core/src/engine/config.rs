//! Engine configuration, validated before any simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration failures. All are fatal and reported before the first
/// period is simulated — a misconfigured run never returns a partial
/// trajectory.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),
    #[error("commission rate must be in [0, 1), got {0}")]
    CommissionOutOfRange(f64),
    #[error("lookback window must be >= 1, got {0}")]
    ZeroLookback(usize),
    #[error("stop-loss fraction must be in (0, 1), got {0}")]
    StopLossOutOfRange(f64),
    #[error("periods per year must be positive, got {0}")]
    NonPositiveAnnualization(f64),
    #[error("oversold bound {oversold} must be below overbought bound {overbought}")]
    OscillatorBandsInverted { oversold: f64, overbought: f64 },
}

/// Capital and friction parameters shared by every policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub initial_capital: f64,
    /// Fraction of traded value charged on each leg, in [0, 1).
    pub commission_rate: f64,
    /// Force-close any open position at the last available price when the
    /// run ends. Default false: open positions stay mark-to-market, so
    /// `final_value` reflects unrealized gains.
    #[serde(default)]
    pub liquidate_at_end: bool,
}

impl EngineConfig {
    pub fn new(initial_capital: f64, commission_rate: f64) -> Result<Self, ConfigError> {
        let config = Self {
            initial_capital,
            commission_rate,
            liquidate_at_end: false,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_capital > 0.0) {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        if !(0.0..1.0).contains(&self.commission_rate) {
            return Err(ConfigError::CommissionOutOfRange(self.commission_rate));
        }
        Ok(())
    }

    pub fn with_liquidate_at_end(mut self, liquidate: bool) -> Self {
        self.liquidate_at_end = liquidate;
        self
    }
}
