//! Average volume and relative volume

use crate::common::math;
use crate::models::market::Bar;

/// Mean volume over the most recent `period` bars.
pub fn calculate_average_volume(bars: &[Bar], period: usize) -> Option<f64> {
    let volumes: Vec<f64> = math::tail(bars, period).iter().map(|b| b.volume).collect();
    math::mean(&volumes)
}

/// Current volume relative to its average. Defined as 0 when the average is
/// zero or negative.
pub fn calculate_volume_ratio(current_volume: f64, average_volume: f64) -> f64 {
    math::guarded_ratio(current_volume, average_volume)
}
