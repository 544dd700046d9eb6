//! Unit tests for the per-day alert memory

use chrono::NaiveDate;
use market_monitor::core::AlertMemory;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn test_new_memory_evaluates_everything() {
    let memory = AlertMemory::new();
    assert!(memory.is_empty());
    assert!(memory.should_evaluate("AAPL"));
    assert_eq!(memory.last_day(), None);
}

#[test]
fn test_record_blocks_until_rollover() {
    let mut memory = AlertMemory::new();
    memory.rollover_if_new_day(date(4));
    memory.record("AAPL");
    memory.record("AAPL");

    assert_eq!(memory.len(), 1);
    assert!(!memory.should_evaluate("AAPL"));
    assert!(memory.should_evaluate("MSFT"));

    assert!(!memory.rollover_if_new_day(date(4)));
    assert!(!memory.should_evaluate("AAPL"));

    assert!(memory.rollover_if_new_day(date(5)));
    assert!(memory.should_evaluate("AAPL"));
    assert!(memory.is_empty());
    assert_eq!(memory.last_day(), Some(date(5)));
}

#[test]
fn test_first_rollover_counts_as_new_day() {
    let mut memory = AlertMemory::new();
    assert!(memory.rollover_if_new_day(date(4)));
}

#[test]
fn test_rollover_backwards_also_clears() {
    let mut memory = AlertMemory::new();
    memory.rollover_if_new_day(date(5));
    memory.record("TSLA");
    assert!(memory.rollover_if_new_day(date(4)));
    assert!(memory.is_empty());
}

#[test]
fn test_alerted_tickers_sorted() {
    let mut memory = AlertMemory::new();
    memory.record("TSLA");
    memory.record("AAPL");
    memory.record("MSFT");
    assert_eq!(memory.alerted_tickers(), vec!["AAPL", "MSFT", "TSLA"]);
}
