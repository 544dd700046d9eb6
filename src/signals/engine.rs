//! Rule-based signal engine: bar history + live quote -> fired signals.

use crate::indicators::snapshot::compute_snapshot;
use crate::indicators::structure::is_breakout;
use crate::indicators::volatility::is_compressed;
use crate::indicators::volume::is_accumulating;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::market::{Bar, Quote};
use crate::models::signal::{Signal, SignalSet};
use crate::signals::thresholds::ThresholdConfig;

/// Minimum number of daily bars before a ticker is evaluated.
pub const MIN_BARS: usize = 60;

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate all rules for one ticker.
    ///
    /// Returns an empty set when `bars` holds fewer than [`MIN_BARS`]
    /// observations.
    pub fn evaluate(bars: &[Bar], quote: &Quote, thresholds: &ThresholdConfig) -> SignalSet {
        Self::evaluate_with_indicators(bars, quote, thresholds)
            .map(|(signals, _)| signals)
            .unwrap_or_default()
    }

    /// Evaluate signals and return the indicator snapshot they were derived
    /// from (needed for alert reports). `None` on insufficient history.
    pub fn evaluate_with_indicators(
        bars: &[Bar],
        quote: &Quote,
        thresholds: &ThresholdConfig,
    ) -> Option<(SignalSet, IndicatorSnapshot)> {
        if bars.len() < MIN_BARS {
            return None;
        }
        let snapshot = compute_snapshot(bars, quote, thresholds.resistance_period)?;
        let signals = Self::apply_rules(&snapshot, quote, thresholds);
        Some((signals, snapshot))
    }

    /// Apply the rules in fixed order: breakout, volume spike, momentum
    /// extension, compression with accumulation. Rules are independent and
    /// cumulative except the two momentum extensions, which are exclusive.
    pub fn apply_rules(
        snapshot: &IndicatorSnapshot,
        quote: &Quote,
        thresholds: &ThresholdConfig,
    ) -> SignalSet {
        let mut signals = SignalSet::new();
        let price = quote.price;

        if is_breakout(price, snapshot.resistance) {
            signals.push(Signal::Breakout);
        }

        if quote.volume > thresholds.volume_threshold {
            signals.push(Signal::VolumeSpike);
        }

        // A zero price means the provider sent no quote; it is not a crash.
        if price > snapshot.moving_avg_20 * thresholds.bullish_factor {
            signals.push(Signal::BullishExtension);
        } else if price > 0.0 && price < snapshot.moving_avg_20 * thresholds.bearish_factor {
            signals.push(Signal::BearishExtension);
        }

        let compressed = is_compressed(
            snapshot.range_10,
            snapshot.range_50,
            thresholds.compression_factor,
        );
        let accumulating = is_accumulating(
            snapshot.volume_3,
            snapshot.volume_prev_20,
            thresholds.accumulation_factor,
        );
        if compressed && accumulating {
            signals.push(Signal::CompressionAccumulation);
        }

        signals
    }
}
