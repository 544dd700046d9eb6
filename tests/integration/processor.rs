//! Integration tests for per-ticker processing

use std::sync::Arc;

use market_monitor::core::{AlertMemory, TickerOutcome, TickerProcessor};
use market_monitor::metrics::Metrics;
use market_monitor::models::{Quote, Signal};
use market_monitor::signals::ThresholdConfig;

use crate::test_utils::{create_test_bars, FakeGateway, RecordingNotifier};

fn processor(gateway: Arc<FakeGateway>, notifier: Arc<RecordingNotifier>) -> TickerProcessor {
    TickerProcessor::new(gateway, notifier, ThresholdConfig::default())
}

#[tokio::test]
async fn alerts_once_then_skips_without_fetching() {
    let gateway = Arc::new(FakeGateway::new().with_ticker(
        "AAPL",
        create_test_bars(65),
        Some(Quote::new("AAPL", 100.0, 1_000_000)),
    ));
    let notifier = Arc::new(RecordingNotifier::new());
    let processor = processor(gateway.clone(), notifier.clone());
    let mut memory = AlertMemory::new();

    let outcome = processor.process_ticker("AAPL", &mut memory).await;
    match outcome {
        TickerOutcome::Alerted { signals, delivered } => {
            assert_eq!(signals.as_slice(), &[Signal::VolumeSpike]);
            assert!(delivered);
        }
        other => panic!("expected an alert, got {:?}", other),
    }
    assert!(!memory.should_evaluate("AAPL"));

    let report = &notifier.sent()[0];
    assert_eq!(report.symbol, "AAPL");
    assert_eq!(report.indicators.volume_ratio, 1.0);

    let second = processor.process_ticker("AAPL", &mut memory).await;
    assert_eq!(second, TickerOutcome::AlreadyAlerted);
    assert_eq!(gateway.history_calls(), 1);
    assert_eq!(gateway.quote_calls(), 1);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn delivery_failure_still_records_ticker() {
    let gateway = Arc::new(FakeGateway::new().with_ticker(
        "TSLA",
        create_test_bars(65),
        Some(Quote::new("TSLA", 100.0, 2_000_000)),
    ));
    let notifier = Arc::new(RecordingNotifier::failing());
    let processor = processor(gateway, notifier.clone());
    let mut memory = AlertMemory::new();

    let outcome = processor.process_ticker("TSLA", &mut memory).await;
    assert!(matches!(
        outcome,
        TickerOutcome::Alerted {
            delivered: false,
            ..
        }
    ));
    assert!(!memory.should_evaluate("TSLA"));
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn short_history_skips_before_quote() {
    let gateway = Arc::new(FakeGateway::new().with_ticker(
        "NEW",
        create_test_bars(30),
        Some(Quote::new("NEW", 100.0, 1_000_000)),
    ));
    let notifier = Arc::new(RecordingNotifier::new());
    let processor = processor(gateway.clone(), notifier.clone());
    let mut memory = AlertMemory::new();

    let outcome = processor.process_ticker("NEW", &mut memory).await;
    assert_eq!(outcome, TickerOutcome::InsufficientData { bars: 30 });
    assert_eq!(gateway.quote_calls(), 0);
    assert!(memory.should_evaluate("NEW"));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn empty_or_failed_history_is_skipped() {
    let gateway = Arc::new(FakeGateway::new().with_ticker("EMPTY", Vec::new(), None));
    let notifier = Arc::new(RecordingNotifier::new());
    let processor = processor(gateway.clone(), notifier);
    let mut memory = AlertMemory::new();

    assert_eq!(
        processor.process_ticker("EMPTY", &mut memory).await,
        TickerOutcome::HistoryUnavailable
    );
    assert_eq!(
        processor.process_ticker("UNKNOWN", &mut memory).await,
        TickerOutcome::HistoryUnavailable
    );
    assert_eq!(gateway.quote_calls(), 0);
}

#[tokio::test]
async fn quote_failure_aborts_ticker_without_recording() {
    let gateway = Arc::new(FakeGateway::new().with_ticker("AMD", create_test_bars(65), None));
    let notifier = Arc::new(RecordingNotifier::new());
    let processor = processor(gateway, notifier.clone());
    let mut memory = AlertMemory::new();

    let outcome = processor.process_ticker("AMD", &mut memory).await;
    assert_eq!(outcome, TickerOutcome::QuoteUnavailable);
    assert!(memory.should_evaluate("AMD"));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn quiet_ticker_is_evaluated_but_not_alerted() {
    let gateway = Arc::new(FakeGateway::new().with_ticker(
        "KO",
        create_test_bars(65),
        Some(Quote::new("KO", 100.0, 100_000)),
    ));
    let notifier = Arc::new(RecordingNotifier::new());
    let processor = processor(gateway, notifier.clone());
    let mut memory = AlertMemory::new();

    let outcome = processor.process_ticker("KO", &mut memory).await;
    assert_eq!(outcome, TickerOutcome::NoSignals);
    assert!(memory.should_evaluate("KO"));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn metrics_track_alerts_and_skips() {
    let gateway = Arc::new(FakeGateway::new().with_ticker(
        "AAPL",
        create_test_bars(65),
        Some(Quote::new("AAPL", 100.0, 1_000_000)),
    ));
    let notifier = Arc::new(RecordingNotifier::new());
    let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
    let processor = processor(gateway, notifier).with_metrics(metrics.clone());
    let mut memory = AlertMemory::new();

    processor.process_ticker("AAPL", &mut memory).await;
    processor.process_ticker("AAPL", &mut memory).await;
    processor.process_ticker("GONE", &mut memory).await;

    assert_eq!(metrics.alerts_sent_total.get(), 1);
    assert_eq!(metrics.tickers_evaluated_total.get(), 1);
    assert_eq!(metrics.alerted_tickers_today.get(), 1);
    assert_eq!(
        metrics
            .tickers_skipped_total
            .with_label_values(&["already_alerted"])
            .get(),
        1
    );
    assert_eq!(
        metrics
            .signals_fired_total
            .with_label_values(&["volume_spike"])
            .get(),
        1
    );
    assert_eq!(
        metrics
            .fetch_errors_total
            .with_label_values(&["history"])
            .get(),
        1
    );
}
