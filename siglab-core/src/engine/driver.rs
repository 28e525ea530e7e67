//! The simulation driver — a strict sequential fold over the signal series.
//!
//! Per period i:
//! 1. Settle: drain ledger entries due at i into cash/shares.
//! 2. Stop-loss: if the policy carries one and the open position has
//!    breached it, force-liquidate and skip the decision.
//! 3. Decide: ask the policy, execute Buy/Sell through the position (and
//!    the ledger, for T+N policies).
//! 4. Mark-to-market: append settled cash + pending cash + all shares
//!    (settled and pending) at the next period's price.
//!
//! The loop bound is the input length; once validation passes, a run always
//! completes. Unaffordable buys, dead-zone signals, and sells with no shares
//! are silent no-ops by design.

use crate::data::AlignedSeries;
use crate::domain::{Position, TradeAction, TradeRecord};
use crate::policy::{Action, PeriodContext, TradingPolicy};

use super::config::{ConfigError, EngineConfig};
use super::settlement::SettlementLedger;

use serde::{Deserialize, Serialize};

/// Complete result of one policy run.
///
/// The trajectory has exactly `series.len() + 1` entries; index 0 is the
/// initial capital. Values are not clamped at zero — a pathological
/// commission schedule shows up in the metrics instead of being hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRun {
    /// Policy name, used as the label in comparisons and artifacts.
    pub label: String,
    /// Portfolio value per period, initial capital first.
    pub trajectory: Vec<f64>,
    /// Every executed trade, in execution order.
    pub trades: Vec<TradeRecord>,
    /// Last trajectory value. With `liquidate_at_end` this is fully
    /// realized; otherwise open positions are marked, not closed.
    pub final_value: f64,
    /// Sum of commission over all legs.
    pub total_commission: f64,
}

impl PolicyRun {
    pub fn num_trades(&self) -> usize {
        self.trades.len()
    }
}

/// Run one policy over an aligned series.
///
/// Validates the config before simulating anything; a misconfigured run
/// returns an error with no partial trajectory.
pub fn run_policy(
    config: &EngineConfig,
    policy: &mut dyn TradingPolicy,
    series: &AlignedSeries,
) -> Result<PolicyRun, ConfigError> {
    config.validate()?;

    let n = series.len();
    let last_period = n.saturating_sub(1);
    let delay = policy.settlement_delay();
    let rate = config.commission_rate;

    let mut position = Position::new(config.initial_capital);
    let mut ledger = SettlementLedger::new();
    let mut trades: Vec<TradeRecord> = Vec::new();
    let mut trajectory = Vec::with_capacity(n + 1);
    trajectory.push(config.initial_capital);
    let mut total_commission = 0.0;

    for i in 0..n {
        let (settled_shares, settled_cash) = ledger.settle(i);
        position.shares_held += settled_shares;
        position.cash += settled_cash;

        let price_now = series.prices[i];
        let date = series.dates[i];

        // Stop-loss runs before the policy sees the period and preempts it.
        let mut stopped_out = false;
        if let Some(pct) = policy.stop_loss_pct() {
            if position.is_holding() {
                if let Some(entry) = position.entry_price {
                    if (price_now - entry) / entry <= -pct {
                        execute_exit(
                            TradeAction::StopLoss,
                            &mut position,
                            &mut ledger,
                            &mut trades,
                            &mut total_commission,
                            i,
                            date,
                            price_now,
                            rate,
                            delay,
                            last_period,
                        );
                        stopped_out = true;
                    }
                }
            }
        }

        if !stopped_out {
            let ctx = PeriodContext {
                period: i,
                predicted_return: series.signals[i],
                price: price_now,
                oscillator: series.oscillator.as_ref().map(|v| v[i]),
                holding: position.is_holding(),
            };

            match policy.decide(&ctx) {
                Action::Buy => {
                    // Cannot stack positions, and cannot buy while a prior
                    // buy is unsettled.
                    if !position.is_holding() && ledger.no_pending_shares() {
                        let affordable = position.cash * (1.0 - rate) / price_now;
                        let shares = if affordable >= 1.0 {
                            affordable.floor() as u64
                        } else {
                            0
                        };
                        // Insufficient cash for a single share: silent no-op.
                        if shares > 0 {
                            let cost = shares as f64 * price_now;
                            let commission = cost * rate;
                            position.open(price_now, shares, commission);
                            total_commission += commission;

                            let settles_at = if delay > 0 {
                                Some((i + delay).min(last_period))
                            } else {
                                None
                            };
                            if delay == 0 {
                                position.shares_held = shares;
                            } else {
                                ledger.enqueue_shares(i, delay, shares, last_period);
                            }
                            trades.push(TradeRecord {
                                date,
                                period: i,
                                action: TradeAction::Buy,
                                price: price_now,
                                shares,
                                commission,
                                cash_after: position.cash,
                                settles_at,
                                pnl: None,
                            });
                        }
                    }
                }
                Action::Sell => {
                    // Only settled shares are sellable.
                    if position.is_holding() {
                        execute_exit(
                            TradeAction::Sell,
                            &mut position,
                            &mut ledger,
                            &mut trades,
                            &mut total_commission,
                            i,
                            date,
                            price_now,
                            rate,
                            delay,
                            last_period,
                        );
                    }
                }
                Action::Hold => {}
            }
        }

        let mark = series.mark_price(i);
        let all_shares = position.shares_held + ledger.pending_shares_total();
        let value = position.cash + ledger.pending_cash_total() + all_shares as f64 * mark;
        trajectory.push(value);
    }

    // Optional terminal liquidation: close settled shares at the final mark
    // price and re-state the last trajectory point net of the exit.
    // Unsettled shares cannot be sold and stay mark-to-market.
    if config.liquidate_at_end && position.is_holding() && n > 0 {
        let price = series.mark_price(last_period);
        let date = series.dates[last_period];
        execute_exit(
            TradeAction::Sell,
            &mut position,
            &mut ledger,
            &mut trades,
            &mut total_commission,
            last_period,
            date,
            price,
            rate,
            delay,
            last_period,
        );
        let value = position.cash
            + ledger.pending_cash_total()
            + ledger.pending_shares_total() as f64 * price;
        trajectory[n] = value;
    }

    let final_value = trajectory[n];
    Ok(PolicyRun {
        label: policy.name().to_string(),
        trajectory,
        trades,
        final_value,
        total_commission,
    })
}

/// Close the open position at `price`, routing proceeds through the ledger
/// for T+N policies. Commission is charged identically for Sell and
/// StopLoss exits.
#[allow(clippy::too_many_arguments)]
fn execute_exit(
    action: TradeAction,
    position: &mut Position,
    ledger: &mut SettlementLedger,
    trades: &mut Vec<TradeRecord>,
    total_commission: &mut f64,
    period: usize,
    date: chrono::NaiveDate,
    price: f64,
    rate: f64,
    delay: usize,
    last_period: usize,
) {
    let shares = position.shares_held;
    let revenue = shares as f64 * price;
    let commission = revenue * rate;
    let net = revenue - commission;
    let pnl = net - position.entry_cost;

    let settles_at = if delay > 0 {
        Some((period + delay).min(last_period))
    } else {
        None
    };
    if delay == 0 {
        position.cash += net;
    } else {
        ledger.enqueue_cash(period, delay, net, last_period);
    }
    position.shares_held = 0;
    position.clear_entry();
    *total_commission += commission;

    trades.push(TradeRecord {
        date,
        period,
        action,
        price,
        shares,
        commission,
        cash_after: position.cash,
        settles_at,
        pnl: Some(pnl),
    });
}
