//! One-pass computation of every derived quantity used by the signal rules

use crate::indicators::structure::calculate_resistance;
use crate::indicators::trend::calculate_sma_close;
use crate::indicators::volatility::calculate_average_range;
use crate::indicators::volume::{
    calculate_average_volume, calculate_preceding_volume, calculate_volume_ratio,
};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::market::{Bar, Quote};

pub const AVERAGE_VOLUME_PERIOD: usize = 20;
pub const MOVING_AVERAGE_PERIOD: usize = 20;
pub const SHORT_RANGE_PERIOD: usize = 10;
pub const LONG_RANGE_PERIOD: usize = 50;
pub const RECENT_VOLUME_PERIOD: usize = 3;
pub const BASELINE_VOLUME_PERIOD: usize = 20;

/// Compute the indicator snapshot for `bars` (oldest first) against `quote`.
///
/// Returns `None` only for an empty series; windows longer than the series
/// use every available bar.
pub fn compute_snapshot(
    bars: &[Bar],
    quote: &Quote,
    resistance_period: usize,
) -> Option<IndicatorSnapshot> {
    let avg_volume_20 = calculate_average_volume(bars, AVERAGE_VOLUME_PERIOD)?;
    let volume_ratio = calculate_volume_ratio(quote.volume as f64, avg_volume_20);

    Some(IndicatorSnapshot {
        avg_volume_20,
        volume_ratio,
        moving_avg_20: calculate_sma_close(bars, MOVING_AVERAGE_PERIOD)?,
        resistance: calculate_resistance(bars, resistance_period.max(1))?,
        resistance_period,
        range_10: calculate_average_range(bars, SHORT_RANGE_PERIOD)?,
        range_50: calculate_average_range(bars, LONG_RANGE_PERIOD)?,
        volume_3: calculate_average_volume(bars, RECENT_VOLUME_PERIOD)?,
        volume_prev_20: calculate_preceding_volume(
            bars,
            RECENT_VOLUME_PERIOD,
            BASELINE_VOLUME_PERIOD,
        )?,
        bar_count: bars.len(),
    })
}
