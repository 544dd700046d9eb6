//! Scanner state shared between the scheduler loop and the health server

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::scheduler::{CycleSummary, MarketPhase, ScheduleState, TickOutcome};

/// Last observed scheduler state, as exposed on `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScannerStatus {
    pub phase: Option<MarketPhase>,
    pub last_tick: Option<DateTime<Utc>>,
    pub trading_day: Option<chrono::NaiveDate>,
    pub alerted_today: Vec<String>,
    pub last_cycle: Option<CycleSummary>,
}

impl ScannerStatus {
    pub fn market_open(&self) -> bool {
        self.phase == Some(MarketPhase::MarketOpen)
    }

    /// Fold one finished tick into the published status.
    pub fn observe(&mut self, now: DateTime<Utc>, state: &ScheduleState, outcome: &TickOutcome) {
        self.phase = state.phase;
        self.last_tick = Some(now);
        self.trading_day = state.alerts.last_day();
        self.alerted_today = state.alerts.alerted_tickers();
        if let TickOutcome::CycleCompleted(summary) = outcome {
            self.last_cycle = Some(summary.clone());
        }
    }
}

pub type StatusHandle = Arc<RwLock<ScannerStatus>>;

pub fn status_handle() -> StatusHandle {
    Arc::new(RwLock::new(ScannerStatus::default()))
}
