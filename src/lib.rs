//! Equity market monitor: scans candidate tickers during the trading window,
//! evaluates technical signals, and sends at most one alert per ticker per day.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
