//! Prometheus metrics for the scan loop and the health server.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,

    pub scan_cycles_total: IntCounter,
    pub tickers_evaluated_total: IntCounter,
    /// Skipped tickers labelled by `reason`.
    pub tickers_skipped_total: IntCounterVec,
    /// Collaborator failures labelled by `source` (history, quote, candidates).
    pub fetch_errors_total: IntCounterVec,
    /// Fired signals labelled by `signal`.
    pub signals_fired_total: IntCounterVec,
    pub alerts_sent_total: IntCounter,
    pub alert_delivery_failures_total: IntCounter,
    pub alerted_tickers_today: IntGauge,
    pub market_open: IntGauge,
    pub ticker_evaluation_duration_seconds: Histogram,

    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("market_monitor".to_string()), None)?;

        let scan_cycles_total =
            IntCounter::new("scan_cycles_total", "Completed candidate scan cycles")?;
        let tickers_evaluated_total =
            IntCounter::new("tickers_evaluated_total", "Tickers run through the signal engine")?;
        let tickers_skipped_total = IntCounterVec::new(
            Opts::new("tickers_skipped_total", "Tickers skipped before evaluation"),
            &["reason"],
        )?;
        let fetch_errors_total = IntCounterVec::new(
            Opts::new("fetch_errors_total", "Upstream fetch failures"),
            &["source"],
        )?;
        let signals_fired_total = IntCounterVec::new(
            Opts::new("signals_fired_total", "Signals fired by rule"),
            &["signal"],
        )?;
        let alerts_sent_total = IntCounter::new("alerts_sent_total", "Alerts delivered")?;
        let alert_delivery_failures_total = IntCounter::new(
            "alert_delivery_failures_total",
            "Alerts that could not be delivered",
        )?;
        let alerted_tickers_today =
            IntGauge::new("alerted_tickers_today", "Tickers already alerted today")?;
        let market_open = IntGauge::new("market_open", "1 while inside the trading window")?;
        let ticker_evaluation_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "ticker_evaluation_duration_seconds",
            "Time spent fetching and evaluating one ticker",
        ))?;

        let http_requests_total = IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests being served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;

        registry.register(Box::new(scan_cycles_total.clone()))?;
        registry.register(Box::new(tickers_evaluated_total.clone()))?;
        registry.register(Box::new(tickers_skipped_total.clone()))?;
        registry.register(Box::new(fetch_errors_total.clone()))?;
        registry.register(Box::new(signals_fired_total.clone()))?;
        registry.register(Box::new(alerts_sent_total.clone()))?;
        registry.register(Box::new(alert_delivery_failures_total.clone()))?;
        registry.register(Box::new(alerted_tickers_today.clone()))?;
        registry.register(Box::new(market_open.clone()))?;
        registry.register(Box::new(ticker_evaluation_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            scan_cycles_total,
            tickers_evaluated_total,
            tickers_skipped_total,
            fetch_errors_total,
            signals_fired_total,
            alerts_sent_total,
            alert_delivery_failures_total,
            alerted_tickers_today,
            market_open,
            ticker_evaluation_duration_seconds,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
        })
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
