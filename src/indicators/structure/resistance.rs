//! Resistance level detection

use crate::common::math;
use crate::models::market::Bar;

/// Highest high over the most recent `lookback` bars, or over all bars when
/// fewer are available.
pub fn calculate_resistance(bars: &[Bar], lookback: usize) -> Option<f64> {
    let highs: Vec<f64> = math::tail(bars, lookback).iter().map(|b| b.high).collect();
    math::max(&highs)
}

/// Check whether `price` trades strictly above the resistance level
pub fn is_breakout(price: f64, resistance: f64) -> bool {
    price > resistance
}
