//! Tunable thresholds for the signal rules

use serde::{Deserialize, Serialize};

/// Thresholds applied by the signal rules. Every value can be overridden at
/// startup through configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Absolute session volume above which a volume spike fires.
    pub volume_threshold: u64,
    /// Number of bars scanned for the resistance high.
    pub resistance_period: usize,
    /// Price above `moving_avg_20 * bullish_factor` is a bullish extension.
    pub bullish_factor: f64,
    /// Price below `moving_avg_20 * bearish_factor` is a bearish extension.
    pub bearish_factor: f64,
    /// 10-day range below `range_50 * compression_factor` counts as compressed.
    pub compression_factor: f64,
    /// 3-day volume above `volume_prev_20 * accumulation_factor` counts as accumulation.
    pub accumulation_factor: f64,
}

impl ThresholdConfig {
    pub const VOLUME_THRESHOLD: u64 = 500_000;
    pub const RESISTANCE_PERIOD: usize = 90;
    pub const BULLISH_FACTOR: f64 = 1.05;
    pub const BEARISH_FACTOR: f64 = 0.95;
    pub const COMPRESSION_FACTOR: f64 = 0.75;
    pub const ACCUMULATION_FACTOR: f64 = 1.5;
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            volume_threshold: Self::VOLUME_THRESHOLD,
            resistance_period: Self::RESISTANCE_PERIOD,
            bullish_factor: Self::BULLISH_FACTOR,
            bearish_factor: Self::BEARISH_FACTOR,
            compression_factor: Self::COMPRESSION_FACTOR,
            accumulation_factor: Self::ACCUMULATION_FACTOR,
        }
    }
}
