//! Unit tests for the indicator snapshot

use market_monitor::indicators::compute_snapshot;

use crate::fixtures::{flat_bars, quote, reference_bars};

#[test]
fn test_snapshot_on_reference_series() {
    let bars = reference_bars();
    let snapshot = compute_snapshot(&bars, &quote(100.0, 1_000_000), 90).unwrap();

    assert_eq!(snapshot.avg_volume_20, 1_000_000.0);
    assert_eq!(snapshot.volume_ratio, 1.0);
    assert_eq!(snapshot.moving_avg_20, 100.0);
    assert_eq!(snapshot.resistance, 101.0);
    assert_eq!(snapshot.resistance_period, 90);
    assert_eq!(snapshot.range_10, 2.0);
    assert_eq!(snapshot.range_50, 2.0);
    assert_eq!(snapshot.volume_3, 1_000_000.0);
    assert_eq!(snapshot.volume_prev_20, 1_000_000.0);
    assert_eq!(snapshot.bar_count, 65);
}

#[test]
fn test_snapshot_empty_series() {
    assert!(compute_snapshot(&[], &quote(100.0, 0), 90).is_none());
}

#[test]
fn test_zero_volume_history_gives_zero_ratio() {
    let bars = flat_bars(65, 100.0, 101.0, 99.0, 0.0);
    let snapshot = compute_snapshot(&bars, &quote(100.0, 750_000), 90).unwrap();
    assert_eq!(snapshot.avg_volume_20, 0.0);
    assert_eq!(snapshot.volume_ratio, 0.0);
}

#[test]
fn test_resistance_period_one_uses_last_high() {
    let mut bars = reference_bars();
    bars[30].high = 130.0;
    bars[64].high = 120.0;

    let short = compute_snapshot(&bars, &quote(100.0, 0), 1).unwrap();
    assert_eq!(short.resistance, 120.0);

    let long = compute_snapshot(&bars, &quote(100.0, 0), 90).unwrap();
    assert_eq!(long.resistance, 130.0);
}
