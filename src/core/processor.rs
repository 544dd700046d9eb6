//! Per-ticker evaluation: dedup check, fetch, evaluate, notify, record.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::core::alert_memory::AlertMemory;
use crate::metrics::Metrics;
use crate::models::report::SignalReport;
use crate::models::signal::SignalSet;
use crate::services::market_data::{MarketDataGateway, DEFAULT_LOOKBACK_DAYS};
use crate::services::notifier::Notifier;
use crate::signals::engine::{SignalEngine, MIN_BARS};
use crate::signals::thresholds::ThresholdConfig;

/// What happened to one ticker in one cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum TickerOutcome {
    /// Already alerted today; nothing fetched.
    AlreadyAlerted,
    /// History fetch failed or returned nothing.
    HistoryUnavailable,
    /// Fewer than the minimum number of daily bars.
    InsufficientData { bars: usize },
    /// Quote fetch failed.
    QuoteUnavailable,
    NoSignals,
    /// Signals fired and the ticker is now recorded for today, whether or
    /// not delivery succeeded.
    Alerted { signals: SignalSet, delivered: bool },
}

impl TickerOutcome {
    fn skip_reason(&self) -> Option<&'static str> {
        match self {
            TickerOutcome::AlreadyAlerted => Some("already_alerted"),
            TickerOutcome::HistoryUnavailable => Some("history_unavailable"),
            TickerOutcome::InsufficientData { .. } => Some("insufficient_data"),
            TickerOutcome::QuoteUnavailable => Some("quote_unavailable"),
            TickerOutcome::NoSignals | TickerOutcome::Alerted { .. } => None,
        }
    }
}

pub struct TickerProcessor {
    gateway: Arc<dyn MarketDataGateway>,
    notifier: Arc<dyn Notifier>,
    thresholds: ThresholdConfig,
    lookback_days: u32,
    metrics: Option<Arc<Metrics>>,
}

impl TickerProcessor {
    pub fn new(
        gateway: Arc<dyn MarketDataGateway>,
        notifier: Arc<dyn Notifier>,
        thresholds: ThresholdConfig,
    ) -> Self {
        Self {
            gateway,
            notifier,
            thresholds,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            metrics: None,
        }
    }

    pub fn with_lookback_days(mut self, lookback_days: u32) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Evaluate one ticker. Never fails: every collaborator error is logged
    /// and folded into the returned outcome.
    pub async fn process_ticker(&self, ticker: &str, memory: &mut AlertMemory) -> TickerOutcome {
        let start = Instant::now();
        let outcome = self.run(ticker, memory).await;

        if let Some(ref metrics) = self.metrics {
            match outcome.skip_reason() {
                Some(reason) => metrics
                    .tickers_skipped_total
                    .with_label_values(&[reason])
                    .inc(),
                None => {
                    metrics.tickers_evaluated_total.inc();
                    metrics
                        .ticker_evaluation_duration_seconds
                        .observe(start.elapsed().as_secs_f64());
                }
            }
            metrics.alerted_tickers_today.set(memory.len() as i64);
        }

        outcome
    }

    async fn run(&self, ticker: &str, memory: &mut AlertMemory) -> TickerOutcome {
        if !memory.should_evaluate(ticker) {
            debug!(symbol = %ticker, "Processor: {} already alerted today, skipping", ticker);
            return TickerOutcome::AlreadyAlerted;
        }

        debug!(symbol = %ticker, "Processor: analyzing {}", ticker);

        let bars = match self.gateway.get_history(ticker, self.lookback_days).await {
            Ok(bars) if bars.is_empty() => {
                debug!(symbol = %ticker, "Processor: no history returned for {}", ticker);
                return TickerOutcome::HistoryUnavailable;
            }
            Ok(bars) => bars,
            Err(e) => {
                warn!(
                    symbol = %ticker,
                    error = %e,
                    "Processor: history fetch failed for {}, skipping",
                    ticker
                );
                self.count_fetch_error("history");
                return TickerOutcome::HistoryUnavailable;
            }
        };

        if bars.len() < MIN_BARS {
            debug!(
                symbol = %ticker,
                count = bars.len(),
                min = MIN_BARS,
                "Processor: not enough bars ({} < {}) for {}",
                bars.len(),
                MIN_BARS,
                ticker
            );
            return TickerOutcome::InsufficientData { bars: bars.len() };
        }

        let quote = match self.gateway.get_quote(ticker).await {
            Ok(quote) => quote,
            Err(e) => {
                error!(
                    symbol = %ticker,
                    error = %e,
                    "Processor: quote fetch failed for {}, aborting ticker",
                    ticker
                );
                self.count_fetch_error("quote");
                return TickerOutcome::QuoteUnavailable;
            }
        };

        let Some((signals, indicators)) =
            SignalEngine::evaluate_with_indicators(&bars, &quote, &self.thresholds)
        else {
            return TickerOutcome::InsufficientData { bars: bars.len() };
        };

        if signals.is_empty() {
            debug!(symbol = %ticker, "Processor: no signals for {}", ticker);
            return TickerOutcome::NoSignals;
        }

        info!(
            symbol = %ticker,
            signals = %signals.joined_labels(),
            count = signals.len(),
            "Processor: signal(s) found for {} -> {}",
            ticker,
            signals.joined_labels()
        );
        if let Some(ref metrics) = self.metrics {
            for signal in &signals {
                metrics
                    .signals_fired_total
                    .with_label_values(&[signal.id()])
                    .inc();
            }
        }

        let report = SignalReport::new(ticker, &quote, indicators, signals.clone());
        let delivered = match self.notifier.send(&report).await {
            Ok(()) => {
                if let Some(ref metrics) = self.metrics {
                    metrics.alerts_sent_total.inc();
                }
                true
            }
            Err(e) => {
                error!(
                    symbol = %ticker,
                    error = %e,
                    "Processor: failed to deliver alert for {}",
                    ticker
                );
                if let Some(ref metrics) = self.metrics {
                    metrics.alert_delivery_failures_total.inc();
                }
                false
            }
        };

        // Recorded even on delivery failure: at most one alert attempt per day.
        memory.record(ticker);

        TickerOutcome::Alerted { signals, delivered }
    }

    fn count_fetch_error(&self, source: &str) {
        if let Some(ref metrics) = self.metrics {
            metrics.fetch_errors_total.with_label_values(&[source]).inc();
        }
    }
}
