//! Price/volume indicators computed over daily bars.

pub mod snapshot;
pub mod structure;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use snapshot::compute_snapshot;
