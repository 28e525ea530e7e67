//! Settlement ledger — T+N delayed availability of shares and cash.
//!
//! A delayed BUY debits cash at trade time but parks the shares here until
//! the settlement period arrives; a delayed SELL zeroes the position at trade
//! time but parks the net proceeds. Unsettled assets are not tradeable, yet
//! they still count toward mark-to-market portfolio value.

use std::collections::VecDeque;

/// FIFO queues of pending shares and cash, keyed by settlement period.
#[derive(Debug, Clone, Default)]
pub struct SettlementLedger {
    pending_shares: VecDeque<(usize, u64)>,
    pending_cash: VecDeque<(usize, f64)>,
}

impl SettlementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue shares from a BUY initiated at `period` with delay `delay`.
    ///
    /// The settlement period is clamped to `last_period` when the series
    /// ends before T+N arrives; the shares then never become tradeable
    /// during the run but remain in the mark-to-market value.
    pub fn enqueue_shares(&mut self, period: usize, delay: usize, shares: u64, last_period: usize) {
        let settles_at = (period + delay).min(last_period.max(period));
        self.pending_shares.push_back((settles_at, shares));
    }

    /// Queue net proceeds from a SELL initiated at `period`.
    pub fn enqueue_cash(&mut self, period: usize, delay: usize, amount: f64, last_period: usize) {
        let settles_at = (period + delay).min(last_period.max(period));
        self.pending_cash.push_back((settles_at, amount));
    }

    /// Drain every entry whose settlement period has arrived.
    ///
    /// Returns (shares, cash) to credit to the position. Entries settle in
    /// enqueue order; an entry queued for the current period after this call
    /// waits until the next one.
    pub fn settle(&mut self, period: usize) -> (u64, f64) {
        let mut shares = 0u64;
        while let Some(&(at, qty)) = self.pending_shares.front() {
            if at > period {
                break;
            }
            shares += qty;
            self.pending_shares.pop_front();
        }

        let mut cash = 0.0;
        while let Some(&(at, amount)) = self.pending_cash.front() {
            if at > period {
                break;
            }
            cash += amount;
            self.pending_cash.pop_front();
        }

        (shares, cash)
    }

    /// Unsettled shares, for mark-to-market valuation.
    pub fn pending_shares_total(&self) -> u64 {
        self.pending_shares.iter().map(|&(_, q)| q).sum()
    }

    /// Unsettled cash, for mark-to-market valuation.
    pub fn pending_cash_total(&self) -> f64 {
        self.pending_cash.iter().map(|&(_, a)| a).sum()
    }

    /// Whether a prior BUY is still waiting to settle. Buy eligibility
    /// requires this to be true.
    pub fn no_pending_shares(&self) -> bool {
        self.pending_shares.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_shares.is_empty() && self.pending_cash.is_empty()
    }
}
