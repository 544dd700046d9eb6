//! Signal evaluation interfaces.

pub mod engine;
pub mod thresholds;

pub use engine::{SignalEngine, MIN_BARS};
pub use thresholds::ThresholdConfig;
