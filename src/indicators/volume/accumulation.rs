//! Short-term volume build-up versus the preceding baseline

use crate::common::math;
use crate::models::market::Bar;

/// Mean volume of the `baseline` bars that precede the most recent `recent`
/// bars: take the last `recent + baseline` bars and keep the oldest
/// `baseline` of them.
pub fn calculate_preceding_volume(bars: &[Bar], recent: usize, baseline: usize) -> Option<f64> {
    let window = math::tail(bars, recent + baseline);
    let end = window.len().min(baseline);
    let volumes: Vec<f64> = window[..end].iter().map(|b| b.volume).collect();
    math::mean(&volumes)
}

/// Recent volume exceeds `factor` times the baseline volume.
pub fn is_accumulating(recent_volume: f64, baseline_volume: f64, factor: f64) -> bool {
    recent_volume > baseline_volume * factor
}
