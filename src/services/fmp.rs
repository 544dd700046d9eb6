//! Financial Modeling Prep client: market movers and exchange symbol lists

use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use crate::services::candidates::{normalize_symbols, CandidateSource};
use crate::services::error::{check_status, ServiceError};

pub const FMP_BASE_URL: &str = "https://financialmodelingprep.com";

/// Daily mover lists published by FMP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverList {
    Gainers,
    Losers,
    Actives,
}

impl MoverList {
    pub const ALL: [MoverList; 3] = [MoverList::Gainers, MoverList::Losers, MoverList::Actives];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoverList::Gainers => "gainers",
            MoverList::Losers => "losers",
            MoverList::Actives => "actives",
        }
    }
}

/// One row of an FMP symbol list. Older endpoints name the field `ticker`,
/// and some rows carry both.
#[derive(Debug, Deserialize)]
struct SymbolEntry {
    symbol: Option<String>,
    ticker: Option<String>,
}

impl SymbolEntry {
    fn into_symbol(self) -> Option<String> {
        self.symbol.or(self.ticker)
    }
}

pub struct FmpClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl FmpClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(FMP_BASE_URL, api_key, reqwest::Client::new())
    }

    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Symbols on one of the daily mover lists.
    pub async fn get_movers(&self, list: MoverList) -> Result<Vec<String>, ServiceError> {
        self.get_symbols(&format!("api/v3/stock_market/{}", list.as_str()))
            .await
    }

    /// Every symbol listed on `exchange` (e.g. `NASDAQ`).
    pub async fn get_exchange_symbols(&self, exchange: &str) -> Result<Vec<String>, ServiceError> {
        self.get_symbols(&format!("api/v3/symbol/{}", exchange)).await
    }

    async fn get_symbols(&self, path: &str) -> Result<Vec<String>, ServiceError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url.trim_end_matches('/'), path))?;
        url.query_pairs_mut().append_pair("apikey", &self.api_key);

        let response = self.client.get(url).send().await?;
        let entries: Vec<SymbolEntry> = check_status(response).await?.json().await?;
        Ok(normalize_symbols(entries.into_iter().filter_map(SymbolEntry::into_symbol)))
    }
}

/// Union of today's gainers, losers and most active tickers.
pub struct FmpMoversSource {
    client: Arc<FmpClient>,
    lists: Vec<MoverList>,
}

impl FmpMoversSource {
    pub fn new(client: Arc<FmpClient>) -> Self {
        Self {
            client,
            lists: MoverList::ALL.to_vec(),
        }
    }
}

#[async_trait::async_trait]
impl CandidateSource for FmpMoversSource {
    fn name(&self) -> &str {
        "fmp-movers"
    }

    async fn get_candidates(&self) -> Result<Vec<String>, ServiceError> {
        let mut combined = Vec::new();
        for list in &self.lists {
            match self.client.get_movers(*list).await {
                Ok(symbols) => combined.extend(symbols),
                Err(e) => {
                    warn!(
                        list = list.as_str(),
                        error = %e,
                        "FmpMoversSource: failed to fetch {} list",
                        list.as_str()
                    );
                }
            }
        }
        let candidates = normalize_symbols(combined);
        info!(
            count = candidates.len(),
            "FmpMoversSource: sweep found {} dynamic candidates",
            candidates.len()
        );
        Ok(candidates)
    }
}

/// Full symbol list of one exchange.
pub struct FmpExchangeSource {
    client: Arc<FmpClient>,
    exchange: String,
}

impl FmpExchangeSource {
    pub fn new(client: Arc<FmpClient>, exchange: impl Into<String>) -> Self {
        Self {
            client,
            exchange: exchange.into(),
        }
    }
}

#[async_trait::async_trait]
impl CandidateSource for FmpExchangeSource {
    fn name(&self) -> &str {
        "fmp-exchange"
    }

    async fn get_candidates(&self) -> Result<Vec<String>, ServiceError> {
        let candidates = self.client.get_exchange_symbols(&self.exchange).await?;
        info!(
            exchange = %self.exchange,
            count = candidates.len(),
            "FmpExchangeSource: {} lists {} symbols",
            self.exchange,
            candidates.len()
        );
        Ok(candidates)
    }
}
