//! Candidate sources: which tickers to evaluate this cycle.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::services::error::ServiceError;

/// Supplies the tickers to evaluate in the current cycle.
#[async_trait::async_trait]
pub trait CandidateSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Ticker symbols, deduplicated, in a stable order.
    async fn get_candidates(&self) -> Result<Vec<String>, ServiceError>;
}

/// Default curated list used when no watch-list is configured.
pub const DEFAULT_WATCHLIST: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "AMZN", "GOOGL", "META", "TSLA", "AMD", "NFLX", "PLTR", "SOFI",
    "COIN", "MARA", "RIOT", "INTC", "BA", "DIS", "NIO", "F", "UBER",
];

/// Trim and upper-case symbols, drop blanks, and collapse duplicates keeping
/// the first occurrence.
pub fn normalize_symbols<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    symbols
        .into_iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Parse a comma separated watch-list (`"AAPL, msft,,TSLA"`).
pub fn parse_watchlist(raw: &str) -> Vec<String> {
    normalize_symbols(raw.split(','))
}

/// Fixed, curated list of tickers.
pub struct WatchlistSource {
    tickers: Vec<String>,
}

impl WatchlistSource {
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tickers: normalize_symbols(tickers),
        }
    }
}

impl Default for WatchlistSource {
    fn default() -> Self {
        Self::new(DEFAULT_WATCHLIST.iter().copied())
    }
}

#[async_trait::async_trait]
impl CandidateSource for WatchlistSource {
    fn name(&self) -> &str {
        "watchlist"
    }

    async fn get_candidates(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.tickers.clone())
    }
}

/// Union of several sources. A failing member is logged and skipped so the
/// others still contribute.
pub struct CompositeSource {
    sources: Vec<Arc<dyn CandidateSource>>,
}

impl CompositeSource {
    pub fn new(sources: Vec<Arc<dyn CandidateSource>>) -> Self {
        Self { sources }
    }
}

#[async_trait::async_trait]
impl CandidateSource for CompositeSource {
    fn name(&self) -> &str {
        "composite"
    }

    async fn get_candidates(&self) -> Result<Vec<String>, ServiceError> {
        let mut combined = Vec::new();
        for source in &self.sources {
            match source.get_candidates().await {
                Ok(tickers) => {
                    debug!(
                        source = source.name(),
                        count = tickers.len(),
                        "CompositeSource: {} returned {} tickers",
                        source.name(),
                        tickers.len()
                    );
                    combined.extend(tickers);
                }
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        "CompositeSource: {} failed, continuing with remaining sources",
                        source.name()
                    );
                }
            }
        }
        Ok(normalize_symbols(combined))
    }
}
