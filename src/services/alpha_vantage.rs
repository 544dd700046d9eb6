//! Alpha Vantage GLOBAL_QUOTE client

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

use crate::models::market::{Quote, DEFAULT_CHANGE_PERCENT};
use crate::services::error::{check_status, ServiceError};

pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<HashMap<String, String>>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

pub struct AlphaVantageClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AlphaVantageClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(ALPHA_VANTAGE_BASE_URL, api_key, reqwest::Client::new())
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

    pub async fn get_global_quote(&self, symbol: &str) -> Result<Quote, ServiceError> {
        let mut url = Url::parse(&format!("{}/query", self.base_url.trim_end_matches('/')))?;
        url.query_pairs_mut()
            .append_pair("function", "GLOBAL_QUOTE")
            .append_pair("symbol", symbol)
            .append_pair("apikey", &self.api_key);

        let response = self.client.get(url).send().await?;
        let body: Value = check_status(response).await?.json().await?;
        let quote = parse_global_quote(symbol, body)?;

        debug!(
            symbol = %symbol,
            price = quote.price,
            volume = quote.volume,
            "AlphaVantage: quote for {} at {:.2}",
            symbol,
            quote.price
        );
        Ok(quote)
    }
}

/// Decode a GLOBAL_QUOTE payload.
///
/// Missing fields fall back to zero values; fields that are present but not
/// numeric are a parse error. A payload without a quote object (throttling
/// note, unknown symbol) is an error.
pub fn parse_global_quote(symbol: &str, body: Value) -> Result<Quote, ServiceError> {
    let response: GlobalQuoteResponse =
        serde_json::from_value(body).map_err(|e| ServiceError::Parse(e.to_string()))?;

    if let Some(note) = response.note.or(response.information) {
        return Err(ServiceError::RateLimited(note));
    }
    if let Some(message) = response.error_message {
        return Err(ServiceError::InvalidRequest(message));
    }

    let fields = response
        .global_quote
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ServiceError::Empty(symbol.to_string()))?;

    let price = parse_field::<f64>(&fields, "05. price")?.unwrap_or(0.0);
    let change = parse_field::<f64>(&fields, "09. change")?.unwrap_or(0.0);
    let volume = parse_field::<u64>(&fields, "06. volume")?.unwrap_or(0);
    let change_percent = fields
        .get("10. change percent")
        .cloned()
        .unwrap_or_else(|| DEFAULT_CHANGE_PERCENT.to_string());
    let symbol = fields
        .get("01. symbol")
        .cloned()
        .unwrap_or_else(|| symbol.to_string());

    Ok(Quote::new(symbol, price, volume).with_change(change, change_percent))
}

fn parse_field<T: std::str::FromStr>(
    fields: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, ServiceError> {
    match fields.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ServiceError::Parse(format!("invalid {}: '{}'", key, raw))),
    }
}
