//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod market;
pub mod report;
pub mod signal;

pub use indicators::IndicatorSnapshot;
pub use market::{Bar, Quote};
pub use report::SignalReport;
pub use signal::{Signal, SignalSet};
