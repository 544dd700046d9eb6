use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily OHLCV observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Bar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    /// High minus low for the session.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Real-time quote for a ticker at evaluation time.
///
/// Providers frequently omit fields; every field has a zero default so a
/// sparse payload still evaluates (to nothing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    /// Percent change exactly as the provider formats it, e.g. `"1.2345%"`.
    pub change_percent: String,
    pub volume: u64,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, price: f64, volume: u64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change: 0.0,
            change_percent: DEFAULT_CHANGE_PERCENT.to_string(),
            volume,
        }
    }

    pub fn with_change(mut self, change: f64, change_percent: impl Into<String>) -> Self {
        self.change = change;
        self.change_percent = change_percent.into();
        self
    }
}

pub const DEFAULT_CHANGE_PERCENT: &str = "0.0%";
