use serde::{Deserialize, Serialize};

/// Derived quantities computed from the tail of a bar series plus the live
/// quote. Everything the signal rules and the alert report need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Mean volume over the last 20 bars.
    pub avg_volume_20: f64,
    /// Quote volume over `avg_volume_20`; 0 when the average is not positive.
    pub volume_ratio: f64,
    /// Mean close over the last 20 bars.
    pub moving_avg_20: f64,
    /// Highest high over the resistance lookback.
    pub resistance: f64,
    pub resistance_period: usize,
    /// Mean high-low range over the last 10 bars.
    pub range_10: f64,
    /// Mean high-low range over the last 50 bars.
    pub range_50: f64,
    /// Mean volume over the last 3 bars.
    pub volume_3: f64,
    /// Mean volume over the 20 bars preceding the last 3.
    pub volume_prev_20: f64,
    pub bar_count: usize,
}
