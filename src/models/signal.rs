use serde::{Deserialize, Serialize};
use std::fmt;

/// A qualitative technical pattern detected for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Price trades above the lookback resistance.
    Breakout,
    /// Session volume above the absolute spike threshold.
    VolumeSpike,
    /// Price stretched above the 20-day average (profit-taking setup).
    BullishExtension,
    /// Price stretched below the 20-day average (pump-and-dump unwind).
    BearishExtension,
    /// Narrowing ranges while recent volume builds (coiled spring).
    CompressionAccumulation,
}

impl Signal {
    /// Stable machine identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Signal::Breakout => "breakout",
            Signal::VolumeSpike => "volume_spike",
            Signal::BullishExtension => "bullish_extension",
            Signal::BearishExtension => "bearish_extension",
            Signal::CompressionAccumulation => "compression_accumulation",
        }
    }

    /// Human-readable label used in alert reports.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Breakout => "🚀 Confirmed Bullish Breakout",
            Signal::VolumeSpike => "🔥 Abnormal Volume Spike",
            Signal::BullishExtension => "🍖 'Barbecue' Pattern (Profit Taking)",
            Signal::BearishExtension => "🚨 'Wildfire' Pattern (Pump and Dump)",
            Signal::CompressionAccumulation => "🧨 Imminent Explosion (Compressed Spring)",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signals fired for one ticker in one cycle, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalSet(Vec<Signal>);

impl SignalSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a signal. A signal already present is not added twice.
    pub fn push(&mut self, signal: Signal) {
        if !self.0.contains(&signal) {
            self.0.push(signal);
        }
    }

    pub fn contains(&self, signal: Signal) -> bool {
        self.0.contains(&signal)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signal> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Signal] {
        &self.0
    }

    /// Labels joined with ", " for one-line rendering.
    pub fn joined_labels(&self) -> String {
        self.0
            .iter()
            .map(Signal::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a SignalSet {
    type Item = &'a Signal;
    type IntoIter = std::slice::Iter<'a, Signal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
