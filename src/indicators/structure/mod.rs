//! Market structure: resistance levels

pub mod resistance;

pub use resistance::*;
