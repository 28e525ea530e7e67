//! Buy-and-hold baseline — the reference every active policy is judged
//! against.
//!
//! Buys the maximum affordable whole-share position at the first price net
//! of commission, holds through the entire series, and liquidates
//! (conceptually, for metric purposes) at the final price net of commission.
//! Trade count is 2 by construction, regardless of horizon.

use crate::data::AlignedSeries;
use crate::domain::{TradeAction, TradeRecord};
use crate::engine::{ConfigError, EngineConfig, PolicyRun};

/// Run buy-and-hold over the aligned price path.
///
/// The trajectory has the same length as an active-policy run on the same
/// series (initial capital + one point per period), so the two curves
/// overlay directly. The final point and `final_value` are net of the
/// conceptual sell commission; intermediate points are gross marks.
pub fn run_buy_and_hold(
    config: &EngineConfig,
    series: &AlignedSeries,
) -> Result<PolicyRun, ConfigError> {
    config.validate()?;

    let rate = config.commission_rate;
    let n = series.len();
    if n == 0 {
        return Ok(PolicyRun {
            label: "buy_and_hold".to_string(),
            trajectory: vec![config.initial_capital],
            trades: Vec::new(),
            final_value: config.initial_capital,
            total_commission: 0.0,
        });
    }
    let first_price = series.prices[0];

    let affordable = config.initial_capital * (1.0 - rate) / first_price;
    let shares = if affordable >= 1.0 {
        affordable.floor() as u64
    } else {
        0
    };
    let cost = shares as f64 * first_price;
    let commission_buy = cost * rate;
    let remaining_cash = config.initial_capital - cost - commission_buy;

    let mut trades = Vec::with_capacity(2);
    let mut trajectory = Vec::with_capacity(n + 1);
    trajectory.push(config.initial_capital);
    for &price in &series.prices {
        trajectory.push(remaining_cash + shares as f64 * price);
    }

    let last_price = series.mark_price(n - 1);
    let revenue = shares as f64 * last_price;
    let commission_sell = revenue * rate;
    let final_value = remaining_cash + revenue - commission_sell;

    trades.push(TradeRecord {
        date: series.dates[0],
        period: 0,
        action: TradeAction::Buy,
        price: first_price,
        shares,
        commission: commission_buy,
        cash_after: remaining_cash,
        settles_at: None,
        pnl: None,
    });
    trades.push(TradeRecord {
        date: series.dates[n - 1],
        period: n - 1,
        action: TradeAction::Sell,
        price: last_price,
        shares,
        commission: commission_sell,
        cash_after: final_value,
        settles_at: None,
        pnl: Some(revenue - commission_sell - (cost + commission_buy)),
    });

    trajectory[n] = final_value;

    Ok(PolicyRun {
        label: "buy_and_hold".to_string(),
        trajectory,
        trades,
        final_value,
        total_commission: commission_buy + commission_sell,
    })
}
