//! Average session range (high - low)

use crate::common::math;
use crate::models::market::Bar;

/// Mean of `high - low` over the most recent `period` bars.
pub fn calculate_average_range(bars: &[Bar], period: usize) -> Option<f64> {
    let ranges: Vec<f64> = math::tail(bars, period).iter().map(Bar::range).collect();
    math::mean(&ranges)
}

/// Short-window range is tighter than `factor` times the long-window range.
pub fn is_compressed(short_range: f64, long_range: f64, factor: f64) -> bool {
    short_range < long_range * factor
}
