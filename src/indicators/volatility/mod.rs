//! Volatility indicators: average range

pub mod range;

pub use range::*;
