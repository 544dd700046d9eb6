//! Per-trading-day record of tickers already alerted

use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::info;

/// Tickers alerted during the current trading day.
///
/// The set only grows within a day and is cleared in full when the observed
/// day changes. Nothing is persisted; a restart starts from an empty set.
#[derive(Debug, Clone, Default)]
pub struct AlertMemory {
    alerted: HashSet<String>,
    last_day: Option<NaiveDate>,
}

impl AlertMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff `ticker` has not been alerted today.
    pub fn should_evaluate(&self, ticker: &str) -> bool {
        !self.alerted.contains(ticker)
    }

    /// Mark `ticker` as alerted today. Idempotent.
    pub fn record(&mut self, ticker: &str) {
        self.alerted.insert(ticker.to_string());
    }

    /// Clear the set if `current_day` differs from the last observed day.
    ///
    /// The first call always counts as a new day. The stored day is updated
    /// to `current_day` on every call.
    pub fn rollover_if_new_day(&mut self, current_day: NaiveDate) -> bool {
        let changed = self.last_day != Some(current_day);
        if changed {
            info!(
                day = %current_day,
                cleared = self.alerted.len(),
                "AlertMemory: new day detected ({}), clearing {} alerted tickers",
                current_day,
                self.alerted.len()
            );
            self.alerted.clear();
        }
        self.last_day = Some(current_day);
        changed
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.last_day
    }

    pub fn len(&self) -> usize {
        self.alerted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerted.is_empty()
    }

    /// Alerted tickers in sorted order.
    pub fn alerted_tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self.alerted.iter().cloned().collect();
        tickers.sort();
        tickers
    }
}
