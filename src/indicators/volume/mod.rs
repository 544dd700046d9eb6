//! Volume indicators: averages, ratios, accumulation

pub mod accumulation;
pub mod average;

pub use accumulation::*;
pub use average::*;
