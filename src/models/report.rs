use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::indicators::IndicatorSnapshot;
use crate::models::market::Quote;
use crate::models::signal::SignalSet;

/// Everything a notifier needs to render one alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: String,
    pub volume: u64,
    pub indicators: IndicatorSnapshot,
    pub signals: SignalSet,
    pub generated_at: DateTime<Utc>,
}

impl SignalReport {
    pub fn new(
        symbol: impl Into<String>,
        quote: &Quote,
        indicators: IndicatorSnapshot,
        signals: SignalSet,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price: quote.price,
            change: quote.change,
            change_percent: quote.change_percent.clone(),
            volume: quote.volume,
            indicators,
            signals,
            generated_at: Utc::now(),
        }
    }

    pub fn is_multi_signal(&self) -> bool {
        self.signals.len() > 1
    }
}
