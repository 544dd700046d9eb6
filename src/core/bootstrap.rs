//! Wiring from [`Config`] to concrete collaborators and the scheduler.

use std::sync::Arc;
use tracing::info;

use crate::config::{CandidateMode, Config, ConfigError};
use crate::core::processor::TickerProcessor;
use crate::core::scheduler::Scheduler;
use crate::metrics::Metrics;
use crate::services::alpha_vantage::AlphaVantageClient;
use crate::services::candidates::{CandidateSource, CompositeSource, WatchlistSource};
use crate::services::discord::DiscordNotifier;
use crate::services::fmp::{FmpClient, FmpExchangeSource, FmpMoversSource};
use crate::services::market_data::{MarketDataClient, MarketDataGateway};
use crate::services::notifier::Notifier;
use crate::services::yahoo::YahooHistoryClient;

pub fn build_candidate_source(config: &Config) -> Result<Arc<dyn CandidateSource>, ConfigError> {
    let watchlist = || -> Arc<dyn CandidateSource> {
        Arc::new(WatchlistSource::new(config.candidates.watchlist.iter()))
    };
    let fmp = || -> Result<Arc<FmpClient>, ConfigError> {
        let api_key = config
            .credentials
            .fmp_api_key
            .clone()
            .ok_or(ConfigError::Missing("FMP_API_KEY"))?;
        Ok(Arc::new(FmpClient::with_client(
            config.endpoints.fmp.clone(),
            api_key,
            reqwest::Client::new(),
        )))
    };

    let source: Arc<dyn CandidateSource> = match config.candidates.mode {
        CandidateMode::Watchlist => watchlist(),
        CandidateMode::Movers => Arc::new(FmpMoversSource::new(fmp()?)),
        CandidateMode::Exchange => Arc::new(FmpExchangeSource::new(
            fmp()?,
            config.candidates.exchange.clone(),
        )),
        CandidateMode::All => {
            let movers: Arc<dyn CandidateSource> = Arc::new(FmpMoversSource::new(fmp()?));
            Arc::new(CompositeSource::new(vec![movers, watchlist()]))
        }
    };
    info!(
        mode = ?config.candidates.mode,
        source = source.name(),
        "Bootstrap: candidate source {}",
        source.name()
    );
    Ok(source)
}

pub fn build_gateway(config: &Config) -> Result<Arc<dyn MarketDataGateway>, ConfigError> {
    let history = YahooHistoryClient::with_base_url(config.endpoints.yahoo.clone()).map_err(
        |e| ConfigError::Invalid {
            key: "YAHOO_BASE_URL",
            value: config.endpoints.yahoo.clone(),
            reason: e.to_string(),
        },
    )?;
    let quotes = AlphaVantageClient::with_client(
        config.endpoints.alpha_vantage.clone(),
        config.credentials.alpha_vantage_api_key.clone(),
        reqwest::Client::new(),
    );
    Ok(Arc::new(MarketDataClient::new(history, quotes)))
}

pub fn build_notifier(config: &Config) -> Arc<dyn Notifier> {
    Arc::new(DiscordNotifier::new(
        config.credentials.discord_webhook_url.clone(),
    ))
}

/// Assemble the production scheduler.
pub fn build_scheduler(config: &Config, metrics: Arc<Metrics>) -> Result<Scheduler, ConfigError> {
    let processor = TickerProcessor::new(
        build_gateway(config)?,
        build_notifier(config),
        config.thresholds.clone(),
    )
    .with_lookback_days(config.schedule.lookback_days)
    .with_metrics(metrics.clone());

    Ok(Scheduler::new(
        config.schedule.clone(),
        build_candidate_source(config)?,
        processor,
    )
    .with_metrics(metrics))
}
