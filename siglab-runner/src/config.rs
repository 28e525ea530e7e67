//! Serializable run configuration.
//!
//! A `RunConfig` captures everything needed to reproduce a run: capital,
//! commission, annualization, end-of-window handling, and the policy with
//! its parameters. Validation happens before any simulation; the same
//! `ConfigError` taxonomy the engine uses applies here.

use serde::{Deserialize, Serialize};
use siglab_core::engine::{ConfigError, EngineConfig};
use siglab_core::policy::{
    mean_reversion, DelayedLongOnly, LongOnly, MeanReversion, TradingPolicy,
};
use std::path::Path;

use crate::metrics::DEFAULT_PERIODS_PER_YEAR;

/// Unique identifier for a run (content-addressable hash).
pub type RunId = String;

/// Serializable configuration for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub initial_capital: f64,

    pub commission_rate: f64,

    /// Annualization factor for the Sharpe ratio.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: f64,

    /// Force-close any open position at the final price instead of
    /// marking to market.
    #[serde(default)]
    pub liquidate_at_end: bool,

    pub policy: PolicyConfig,
}

fn default_periods_per_year() -> f64 {
    DEFAULT_PERIODS_PER_YEAR
}

/// Policy selection with per-policy parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyConfig {
    /// Buy above the threshold, sell at or below it.
    LongOnly { threshold: f64 },

    /// Same rule with T+N availability of shares and proceeds.
    DelayedLongOnly {
        threshold: f64,
        settlement_delay: usize,
    },

    /// Dynamic rolling-mean threshold, oscillator gate, stop-loss.
    MeanReversion {
        neutral_threshold: f64,
        #[serde(default = "default_lookback")]
        lookback_window: usize,
        #[serde(default = "default_min_periods")]
        min_periods: usize,
        #[serde(default = "default_oversold")]
        oversold: f64,
        #[serde(default = "default_overbought")]
        overbought: f64,
        #[serde(default = "default_stop_loss")]
        stop_loss_pct: f64,
    },

    /// Passive baseline.
    BuyAndHold,
}

fn default_lookback() -> usize {
    mean_reversion::DEFAULT_LOOKBACK
}

fn default_min_periods() -> usize {
    mean_reversion::DEFAULT_MIN_PERIODS
}

fn default_oversold() -> f64 {
    mean_reversion::DEFAULT_OVERSOLD
}

fn default_overbought() -> f64 {
    mean_reversion::DEFAULT_OVERBOUGHT
}

fn default_stop_loss() -> f64 {
    mean_reversion::DEFAULT_STOP_LOSS_PCT
}

impl RunConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML configuration file.
    pub fn from_toml_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Validate every parameter; a misconfigured run fails before any
    /// simulation work happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine_config()?;
        if !(self.periods_per_year > 0.0) {
            return Err(ConfigError::NonPositiveAnnualization(self.periods_per_year));
        }
        // Constructing the policy runs its parameter checks.
        self.build_policy()?;
        Ok(())
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        Ok(EngineConfig::new(self.initial_capital, self.commission_rate)?
            .with_liquidate_at_end(self.liquidate_at_end))
    }

    /// Instantiate the configured policy. `None` for the passive baseline,
    /// which bypasses the decision loop entirely.
    pub fn build_policy(&self) -> Result<Option<Box<dyn TradingPolicy>>, ConfigError> {
        match &self.policy {
            PolicyConfig::LongOnly { threshold } => {
                Ok(Some(Box::new(LongOnly::new(*threshold))))
            }
            PolicyConfig::DelayedLongOnly {
                threshold,
                settlement_delay,
            } => Ok(Some(Box::new(DelayedLongOnly::new(
                *threshold,
                *settlement_delay,
            )))),
            PolicyConfig::MeanReversion {
                neutral_threshold,
                lookback_window,
                min_periods,
                oversold,
                overbought,
                stop_loss_pct,
            } => Ok(Some(Box::new(MeanReversion::with_params(
                *neutral_threshold,
                *lookback_window,
                *min_periods,
                *oversold,
                *overbought,
                *stop_loss_pct,
            )?))),
            PolicyConfig::BuyAndHold => Ok(None),
        }
    }

    /// Label for reports and artifact paths.
    pub fn label(&self) -> String {
        match &self.policy {
            PolicyConfig::LongOnly { .. } => "long_only".to_string(),
            PolicyConfig::DelayedLongOnly {
                settlement_delay, ..
            } => format!("long_only_t{settlement_delay}"),
            PolicyConfig::MeanReversion { .. } => "mean_reversion".to_string(),
            PolicyConfig::BuyAndHold => "buy_and_hold".to_string(),
        }
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two identical configs share a RunId, so artifacts from a re-run land
    /// in the same place.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
