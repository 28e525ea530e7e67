//! SigLab Core — the backtesting engine.
//!
//! This crate contains the heart of the system:
//! - Series types and date-key alignment (prices, predicted returns, oscillator)
//! - Position and trade-record domain types
//! - Settlement ledger for T+N delayed availability of cash and shares
//! - The `TradingPolicy` trait and three concrete policies
//! - A single sequential simulation driver shared by all policies
//! - Buy-and-hold baseline
//! - Indicators (rolling mean, RSI) backing the mean-reversion policy
//!
//! One run is a pure function of (config, policy parameters, input series):
//! no I/O, no randomness, no shared state between runs.

pub mod baseline;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod policy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engine types are Send + Sync, so independent runs
    /// can be farmed out to worker threads without retrofitting.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<data::AlignedSeries>();
        require_sync::<data::AlignedSeries>();
        require_send::<domain::Position>();
        require_sync::<domain::Position>();
        require_send::<domain::TradeRecord>();
        require_sync::<domain::TradeRecord>();
        require_send::<engine::EngineConfig>();
        require_sync::<engine::EngineConfig>();
        require_send::<engine::PolicyRun>();
        require_sync::<engine::PolicyRun>();
        require_send::<engine::SettlementLedger>();
        require_sync::<engine::SettlementLedger>();
        require_send::<policy::LongOnly>();
        require_sync::<policy::LongOnly>();
        require_send::<policy::DelayedLongOnly>();
        require_sync::<policy::DelayedLongOnly>();
        require_send::<policy::MeanReversion>();
        require_sync::<policy::MeanReversion>();
    }

    /// Architecture contract: `TradingPolicy::decide` sees only the
    /// `PeriodContext`, never the portfolio. Sizing, settlement, and
    /// trajectory bookkeeping belong to the driver; if the trait signature
    /// grows a portfolio parameter, every implementation breaks loudly.
    #[test]
    fn policy_trait_has_no_portfolio_parameter() {
        fn _check_trait_object_builds(
            p: &mut dyn policy::TradingPolicy,
            ctx: &policy::PeriodContext,
        ) -> policy::Action {
            p.decide(ctx)
        }
    }
}
