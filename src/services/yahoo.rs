//! Yahoo Finance chart API client (daily OHLCV history)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::models::market::Bar;
use crate::services::error::{check_status, ServiceError};

pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

pub struct YahooHistoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooHistoryClient {
    pub fn new() -> Result<Self, ServiceError> {
        Self::with_base_url(YAHOO_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        // Yahoo rejects requests without a browser-like user agent.
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; market-monitor/0.1)")
            .timeout(std::time::Duration::from_secs(20))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Fetch daily bars covering the last `lookback_days`, oldest first.
    pub async fn get_daily_bars(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<Bar>, ServiceError> {
        let mut url = Url::parse(&format!(
            "{}/v8/finance/chart/{}",
            self.base_url.trim_end_matches('/'),
            symbol
        ))?;
        url.query_pairs_mut()
            .append_pair("range", &format!("{}d", lookback_days))
            .append_pair("interval", "1d");

        let response = self.client.get(url).send().await?;
        let body: ChartResponse = check_status(response).await?.json().await?;

        if let Some(err) = body.chart.error {
            return Err(ServiceError::Empty(format!(
                "{} ({}: {})",
                symbol, err.code, err.description
            )));
        }

        let result = body
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| ServiceError::Empty(symbol.to_string()))?;

        let bars = parse_bars(result);
        debug!(
            symbol = %symbol,
            count = bars.len(),
            "Yahoo: fetched {} daily bars for {}",
            bars.len(),
            symbol
        );
        Ok(bars)
    }
}

/// Zip the column arrays into bars, dropping rows with a missing price.
fn parse_bars(result: ChartResult) -> Vec<Bar> {
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let mut bars: Vec<Bar> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let open = (*quote.open.get(i)?)?;
            let high = (*quote.high.get(i)?)?;
            let low = (*quote.low.get(i)?)?;
            let close = (*quote.close.get(i)?)?;
            let volume = quote.volume.get(i).copied().flatten().unwrap_or(0.0);
            let timestamp = DateTime::<Utc>::from_timestamp(ts, 0)?;
            Some(Bar::new(open, high, low, close, volume, timestamp))
        })
        .collect();
    bars.sort_by_key(|b| b.timestamp);
    bars
}
