//! Process configuration loaded from the environment (and `.env`).

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::core::scheduler::{ScheduleConfig, TradingWindow};
use crate::services::alpha_vantage::ALPHA_VANTAGE_BASE_URL;
use crate::services::candidates::{parse_watchlist, DEFAULT_WATCHLIST};
use crate::services::fmp::FMP_BASE_URL;
use crate::services::market_data::DEFAULT_LOOKBACK_DAYS;
use crate::services::yahoo::YAHOO_BASE_URL;
use crate::signals::thresholds::ThresholdConfig;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Which upstream list(s) feed the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateMode {
    /// Gainers, losers and most actives.
    Movers,
    /// Static curated list only.
    Watchlist,
    /// Every symbol on one exchange.
    Exchange,
    /// Movers plus watch-list.
    All,
}

impl CandidateMode {
    pub fn requires_fmp(&self) -> bool {
        !matches!(self, CandidateMode::Watchlist)
    }
}

impl FromStr for CandidateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movers" | "dynamic" => Ok(Self::Movers),
            "watchlist" => Ok(Self::Watchlist),
            "exchange" | "sweep" => Ok(Self::Exchange),
            "all" => Ok(Self::All),
            other => Err(format!(
                "expected movers, watchlist, exchange or all, got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub alpha_vantage_api_key: String,
    pub discord_webhook_url: String,
    pub fmp_api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateConfig {
    pub mode: CandidateMode,
    pub watchlist: Vec<String>,
    pub exchange: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub yahoo: String,
    pub alpha_vantage: String,
    pub fmp: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            yahoo: YAHOO_BASE_URL.to_string(),
            alpha_vantage: ALPHA_VANTAGE_BASE_URL.to_string(),
            fmp: FMP_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: String,
    pub credentials: Credentials,
    pub thresholds: ThresholdConfig,
    pub schedule: ScheduleConfig,
    pub candidates: CandidateConfig,
    pub endpoints: Endpoints,
    /// Health/metrics server port; disabled when unset.
    pub port: Option<u16>,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let candidates = CandidateConfig {
            mode: parse_or(&get, "CANDIDATE_SOURCE", CandidateMode::Movers)?,
            watchlist: get("WATCHLIST")
                .map(|raw| parse_watchlist(&raw))
                .unwrap_or_else(|| DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect()),
            exchange: get("EXCHANGE").unwrap_or_else(|| "NASDAQ".to_string()),
        };

        let alpha_vantage_api_key =
            get("ALPHA_VANTAGE_API_KEY").ok_or(ConfigError::Missing("ALPHA_VANTAGE_API_KEY"))?;
        let discord_webhook_url =
            get("DISCORD_WEBHOOK_URL").ok_or(ConfigError::Missing("DISCORD_WEBHOOK_URL"))?;
        let fmp_api_key = get("FMP_API_KEY");
        if candidates.mode.requires_fmp() && fmp_api_key.is_none() {
            return Err(ConfigError::Missing("FMP_API_KEY"));
        }
        let credentials = Credentials {
            alpha_vantage_api_key,
            discord_webhook_url,
            fmp_api_key,
        };

        let thresholds = ThresholdConfig {
            volume_threshold: parse_or(&get, "UMBRAL_VOLUMEN", ThresholdConfig::VOLUME_THRESHOLD)?,
            resistance_period: parse_or(
                &get,
                "PERIODO_RESISTENCIA",
                ThresholdConfig::RESISTANCE_PERIOD,
            )?,
            bullish_factor: parse_or(&get, "FACTOR_MEDIA_ALCISTA", ThresholdConfig::BULLISH_FACTOR)?,
            bearish_factor: parse_or(&get, "FACTOR_MEDIA_BAJISTA", ThresholdConfig::BEARISH_FACTOR)?,
            compression_factor: parse_or(
                &get,
                "FACTOR_COMPRESION",
                ThresholdConfig::COMPRESSION_FACTOR,
            )?,
            accumulation_factor: parse_or(
                &get,
                "FACTOR_VOLUMEN_ACUMULADO",
                ThresholdConfig::ACCUMULATION_FACTOR,
            )?,
        };
        if thresholds.resistance_period == 0 {
            return Err(ConfigError::Invalid {
                key: "PERIODO_RESISTENCIA",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let defaults = ScheduleConfig::default();
        let (start_hour, start_minute, end_hour, end_minute) = (
            parse_or(&get, "MARKET_OPEN_HOUR", defaults.window.start_hour)?,
            parse_or(&get, "MARKET_OPEN_MINUTE", defaults.window.start_minute)?,
            parse_or(&get, "MARKET_CLOSE_HOUR", defaults.window.end_hour)?,
            parse_or(&get, "MARKET_CLOSE_MINUTE", defaults.window.end_minute)?,
        );
        let window = TradingWindow::new(start_hour, start_minute, end_hour, end_minute)
            .map_err(|e| ConfigError::Invalid {
                key: "MARKET_OPEN_*/MARKET_CLOSE_*",
                value: format!(
                    "{:02}:{:02}-{:02}:{:02}",
                    start_hour, start_minute, end_hour, end_minute
                ),
                reason: e.to_string(),
            })?;
        let schedule = ScheduleConfig {
            window,
            ticker_delay: seconds_or(&get, "TICKER_DELAY_SECONDS", defaults.ticker_delay)?,
            idle_sleep: seconds_or(&get, "IDLE_SLEEP_SECONDS", defaults.idle_sleep)?,
            empty_candidates_sleep: seconds_or(
                &get,
                "EMPTY_CANDIDATES_SLEEP_SECONDS",
                defaults.empty_candidates_sleep,
            )?,
            lookback_days: parse_or(&get, "HISTORY_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS)?,
        };

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            yahoo: get("YAHOO_BASE_URL").unwrap_or(defaults.yahoo),
            alpha_vantage: get("ALPHA_VANTAGE_BASE_URL").unwrap_or(defaults.alpha_vantage),
            fmp: get("FMP_BASE_URL").unwrap_or(defaults.fmp),
        };

        let port = match get("PORT") {
            Some(_) => Some(parse_or(&get, "PORT", 0u16)?),
            None => None,
        };

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or_else(|| "sandbox".to_string()),
            credentials,
            thresholds,
            schedule,
            candidates,
            endpoints,
            port,
        })
    }
}

fn parse_or<G, T>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn seconds_or<G>(get: &G, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    parse_or(get, key, default.as_secs()).map(Duration::from_secs)
}
