//! SMA (Simple Moving Average) of closes

use crate::common::math;
use crate::models::market::Bar;

/// Mean close over the most recent `period` bars.
pub fn calculate_sma_close(bars: &[Bar], period: usize) -> Option<f64> {
    let closes: Vec<f64> = math::tail(bars, period).iter().map(|b| b.close).collect();
    math::mean(&closes)
}
