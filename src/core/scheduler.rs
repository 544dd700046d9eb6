//! Trading-window scheduler driving the sequential scan loop

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::alert_memory::AlertMemory;
use crate::core::clock::{Clock, SystemClock};
use crate::core::processor::{TickerOutcome, TickerProcessor};
use crate::core::status::StatusHandle;
use crate::metrics::Metrics;
use crate::services::candidates::CandidateSource;
use crate::services::market_data::DEFAULT_LOOKBACK_DAYS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("hour {0} is outside 0..=23")]
    Hour(u32),

    #[error("minute {0} is outside 0..=59")]
    Minute(u32),
}

/// Daily window, in UTC, during which candidates are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingWindow {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl TradingWindow {
    pub fn new(
        start_hour: u32,
        start_minute: u32,
        end_hour: u32,
        end_minute: u32,
    ) -> Result<Self, WindowError> {
        if let Some(hour) = [start_hour, end_hour].into_iter().find(|h| *h > 23) {
            return Err(WindowError::Hour(hour));
        }
        if let Some(minute) = [start_minute, end_minute].into_iter().find(|m| *m > 59) {
            return Err(WindowError::Minute(minute));
        }
        Ok(Self {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        })
    }

    /// Window containment test.
    ///
    /// The start bound compares hour and minute independently, so with
    /// `start_minute > 0` every hour's first `start_minute` minutes fall
    /// outside the window. Kept as deployed.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        let (hour, minute) = (now.hour(), now.minute());
        (hour >= self.start_hour && minute >= self.start_minute)
            && (hour < self.end_hour || (hour == self.end_hour && minute <= self.end_minute))
    }
}

impl Default for TradingWindow {
    fn default() -> Self {
        Self {
            start_hour: 7,
            start_minute: 0,
            end_hour: 21,
            end_minute: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPhase {
    MarketOpen,
    MarketClosed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub window: TradingWindow,
    /// Pause after every ticker to stay under upstream rate limits.
    pub ticker_delay: Duration,
    /// Sleep between ticks while the market is closed.
    pub idle_sleep: Duration,
    /// Sleep before retrying when no candidates were returned.
    pub empty_candidates_sleep: Duration,
    pub lookback_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            window: TradingWindow::default(),
            ticker_delay: Duration::from_secs(12),
            idle_sleep: Duration::from_secs(600),
            empty_candidates_sleep: Duration::from_secs(600),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Mutable scheduler state, owned by the caller and threaded through every
/// tick. Lost on restart.
#[derive(Debug, Clone, Default)]
pub struct ScheduleState {
    pub alerts: AlertMemory,
    pub phase: Option<MarketPhase>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Per-cycle tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    pub candidates: usize,
    pub evaluated: usize,
    pub alerted: usize,
    pub already_alerted: usize,
    pub skipped: usize,
}

impl CycleSummary {
    fn record(&mut self, outcome: &TickerOutcome) {
        match outcome {
            TickerOutcome::AlreadyAlerted => self.already_alerted += 1,
            TickerOutcome::HistoryUnavailable
            | TickerOutcome::InsufficientData { .. }
            | TickerOutcome::QuoteUnavailable => self.skipped += 1,
            TickerOutcome::NoSignals => self.evaluated += 1,
            TickerOutcome::Alerted { .. } => {
                self.evaluated += 1;
                self.alerted += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    MarketClosed { sleep: Duration },
    NoCandidates { sleep: Duration },
    CycleCompleted(CycleSummary),
}

impl TickOutcome {
    /// How long to wait before the next tick.
    pub fn sleep_duration(&self) -> Duration {
        match self {
            TickOutcome::MarketClosed { sleep } | TickOutcome::NoCandidates { sleep } => *sleep,
            TickOutcome::CycleCompleted(_) => Duration::ZERO,
        }
    }
}

pub struct Scheduler {
    config: ScheduleConfig,
    candidates: Arc<dyn CandidateSource>,
    processor: TickerProcessor,
    clock: Arc<dyn Clock>,
    metrics: Option<Arc<Metrics>>,
    status: Option<StatusHandle>,
}

impl Scheduler {
    pub fn new(
        config: ScheduleConfig,
        candidates: Arc<dyn CandidateSource>,
        processor: TickerProcessor,
    ) -> Self {
        Self {
            config,
            candidates,
            processor,
            clock: Arc::new(SystemClock),
            metrics: None,
            status: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Publish the state after every tick to `status`.
    pub fn with_status(mut self, status: StatusHandle) -> Self {
        self.status = Some(status);
        self
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn phase_at(&self, now: DateTime<Utc>) -> MarketPhase {
        if self.config.window.contains(now) {
            MarketPhase::MarketOpen
        } else {
            MarketPhase::MarketClosed
        }
    }

    /// Run one scheduler tick: day rollover, window check, then (when open)
    /// one full sequential pass over the current candidates.
    pub async fn tick(&self, state: &mut ScheduleState) -> TickOutcome {
        let now = self.clock.now();
        let outcome = self.step(now, state).await;
        if let Some(ref status) = self.status {
            status.write().await.observe(now, state, &outcome);
        }
        outcome
    }

    async fn step(&self, now: DateTime<Utc>, state: &mut ScheduleState) -> TickOutcome {
        if state.alerts.rollover_if_new_day(now.date_naive()) {
            if let Some(ref metrics) = self.metrics {
                metrics.alerted_tickers_today.set(0);
            }
        }

        let phase = self.phase_at(now);
        if state.phase != Some(phase) {
            info!(
                phase = ?phase,
                time = %now.format("%Y-%m-%d %H:%M:%S"),
                "Scheduler: {} UTC - entering {:?}",
                now.format("%Y-%m-%d %H:%M:%S"),
                phase
            );
            state.phase = Some(phase);
        }
        if let Some(ref metrics) = self.metrics {
            metrics
                .market_open
                .set(i64::from(phase == MarketPhase::MarketOpen));
        }

        if phase == MarketPhase::MarketClosed {
            debug!(
                sleep_secs = self.config.idle_sleep.as_secs(),
                "Scheduler: market closed, sleeping {}s",
                self.config.idle_sleep.as_secs()
            );
            return TickOutcome::MarketClosed {
                sleep: self.config.idle_sleep,
            };
        }

        let candidates = match self.candidates.get_candidates().await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    source = self.candidates.name(),
                    error = %e,
                    "Scheduler: candidate source {} failed",
                    self.candidates.name()
                );
                if let Some(ref metrics) = self.metrics {
                    metrics
                        .fetch_errors_total
                        .with_label_values(&["candidates"])
                        .inc();
                }
                Vec::new()
            }
        };

        if candidates.is_empty() {
            warn!(
                sleep_secs = self.config.empty_candidates_sleep.as_secs(),
                "Scheduler: no candidates available, retrying in {}s",
                self.config.empty_candidates_sleep.as_secs()
            );
            return TickOutcome::NoCandidates {
                sleep: self.config.empty_candidates_sleep,
            };
        }

        info!(
            count = candidates.len(),
            source = self.candidates.name(),
            "Scheduler: analyzing {} candidates",
            candidates.len()
        );

        let mut summary = CycleSummary {
            candidates: candidates.len(),
            ..CycleSummary::default()
        };
        for ticker in &candidates {
            let outcome = self.processor.process_ticker(ticker, &mut state.alerts).await;
            summary.record(&outcome);
            tokio::time::sleep(self.config.ticker_delay).await;
        }

        if let Some(ref metrics) = self.metrics {
            metrics.scan_cycles_total.inc();
        }
        info!(
            candidates = summary.candidates,
            evaluated = summary.evaluated,
            alerted = summary.alerted,
            already_alerted = summary.already_alerted,
            skipped = summary.skipped,
            "Scheduler: cycle finished ({} evaluated, {} alerted)",
            summary.evaluated,
            summary.alerted
        );

        TickOutcome::CycleCompleted(summary)
    }

    /// Tick forever. Only process shutdown stops the loop.
    pub async fn run(&self, mut state: ScheduleState) {
        info!(
            window = ?self.config.window,
            ticker_delay_secs = self.config.ticker_delay.as_secs(),
            "Scheduler: started"
        );
        loop {
            let outcome = self.tick(&mut state).await;
            let sleep = outcome.sleep_duration();
            if !sleep.is_zero() {
                tokio::time::sleep(sleep).await;
            }
        }
    }
}
