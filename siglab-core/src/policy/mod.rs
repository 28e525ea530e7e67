//! Trading policies — the decision seam of the engine.
//!
//! One trait, three implementations. The driver owns every piece of
//! bookkeeping (cash, shares, settlement, stop-loss execution, trajectory);
//! a policy only maps a `PeriodContext` to an `Action`, optionally keeping
//! its own local state (the mean-reversion policy feeds a rolling window).

pub mod delayed;
pub mod long_only;
pub mod mean_reversion;

pub use delayed::DelayedLongOnly;
pub use long_only::LongOnly;
pub use mean_reversion::MeanReversion;

/// What a policy wants done this period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

/// Everything a policy may look at for one period.
///
/// `holding` reflects settled shares only; the driver separately blocks buys
/// while a prior buy is unsettled. `oscillator` is NaN-free only when the
/// caller supplied (or derived) a reading for this date.
#[derive(Debug, Clone, Copy)]
pub struct PeriodContext {
    pub period: usize,
    pub predicted_return: f64,
    pub price: f64,
    pub oscillator: Option<f64>,
    pub holding: bool,
}

/// A trading policy: decision logic plus its execution constraints.
pub trait TradingPolicy {
    /// Short identifier used in reports and artifact names.
    fn name(&self) -> &str;

    /// Map this period's context to an action. Called once per period, in
    /// order; stateful policies may update internal state here.
    fn decide(&mut self, ctx: &PeriodContext) -> Action;

    /// T+N settlement delay in periods. 0 means proceeds are available
    /// immediately.
    fn settlement_delay(&self) -> usize {
        0
    }

    /// Loss fraction that forces liquidation before the decision runs.
    /// None disables the stop-loss check entirely.
    fn stop_loss_pct(&self) -> Option<f64> {
        None
    }
}
