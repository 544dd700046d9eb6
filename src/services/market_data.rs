//! Market data gateway: daily history plus a live quote per ticker.

use crate::models::market::{Bar, Quote};
use crate::services::alpha_vantage::AlphaVantageClient;
use crate::services::error::ServiceError;
use crate::services::yahoo::YahooHistoryClient;

/// Default number of calendar days of daily history requested per ticker.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 65;

#[async_trait::async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// Daily bars for `symbol`, oldest first.
    async fn get_history(&self, symbol: &str, lookback_days: u32) -> Result<Vec<Bar>, ServiceError>;

    /// Current quote for `symbol`.
    async fn get_quote(&self, symbol: &str) -> Result<Quote, ServiceError>;
}

/// Production gateway: history from Yahoo Finance, quotes from Alpha Vantage.
pub struct MarketDataClient {
    history: YahooHistoryClient,
    quotes: AlphaVantageClient,
}

impl MarketDataClient {
    pub fn new(history: YahooHistoryClient, quotes: AlphaVantageClient) -> Self {
        Self { history, quotes }
    }
}

#[async_trait::async_trait]
impl MarketDataGateway for MarketDataClient {
    async fn get_history(&self, symbol: &str, lookback_days: u32) -> Result<Vec<Bar>, ServiceError> {
        self.history.get_daily_bars(symbol, lookback_days).await
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, ServiceError> {
        self.quotes.get_global_quote(symbol).await
    }
}
