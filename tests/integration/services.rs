//! Integration tests for upstream HTTP clients against mocked APIs

use std::sync::Arc;

use market_monitor::config::Config;
use market_monitor::core::bootstrap::{build_candidate_source, build_scheduler};
use market_monitor::metrics::Metrics;
use market_monitor::models::{Quote, Signal, SignalReport};
use market_monitor::services::{
    AlphaVantageClient, CandidateSource, DiscordNotifier, FmpClient, FmpExchangeSource,
    FmpMoversSource, MarketDataClient, MarketDataGateway, MoverList, Notifier, ServiceError,
    YahooHistoryClient,
};
use market_monitor::signals::{SignalEngine, ThresholdConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::create_test_bars;

fn chart_body() -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL" },
                "timestamp": [1704326400, 1704240000, 1704412800],
                "indicators": {
                    "quote": [{
                        "open":   [100.5, 99.5, 102.0],
                        "high":   [102.0, 101.0, 103.0],
                        "low":    [100.0, 99.0, 101.0],
                        "close":  [101.0, 100.0, null],
                        "volume": [1000, null, 3000]
                    }]
                }
            }],
            "error": null
        }
    })
}

fn global_quote_body() -> serde_json::Value {
    json!({
        "Global Quote": {
            "01. symbol": "AAPL",
            "05. price": "187.4400",
            "06. volume": "61234567",
            "09. change": "2.1000",
            "10. change percent": "1.1331%"
        }
    })
}

async fn mock_chart(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("range", "65d"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .mount(server)
        .await;
}

async fn mock_global_quote(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "GLOBAL_QUOTE"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("apikey", "av-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(global_quote_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn yahoo_history_drops_incomplete_rows_and_sorts() {
    let server = MockServer::start().await;
    mock_chart(&server).await;

    let client = YahooHistoryClient::with_client(server.uri(), reqwest::Client::new());
    let bars = client.get_daily_bars("AAPL", 65).await.unwrap();

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].timestamp.timestamp(), 1704240000);
    assert_eq!(bars[0].close, 100.0);
    assert_eq!(bars[0].volume, 0.0);
    assert_eq!(bars[1].close, 101.0);
    assert_eq!(bars[1].volume, 1000.0);
}

#[tokio::test]
async fn yahoo_chart_error_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/DELISTED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found" }
            }
        })))
        .mount(&server)
        .await;

    let client = YahooHistoryClient::with_client(server.uri(), reqwest::Client::new());
    let err = client.get_daily_bars("DELISTED", 65).await.unwrap_err();
    assert!(matches!(err, ServiceError::Empty(_)));
}

#[tokio::test]
async fn yahoo_server_error_maps_to_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let client = YahooHistoryClient::with_client(server.uri(), reqwest::Client::new());
    let err = client.get_daily_bars("AAPL", 65).await.unwrap_err();
    assert!(matches!(err, ServiceError::Http { status: 503, .. }));
}

#[tokio::test]
async fn alpha_vantage_global_quote() {
    let server = MockServer::start().await;
    mock_global_quote(&server).await;

    let client = AlphaVantageClient::with_client(server.uri(), "av-key", reqwest::Client::new());
    let quote = client.get_global_quote("AAPL").await.unwrap();

    assert_eq!(quote.price, 187.44);
    assert_eq!(quote.volume, 61_234_567);
    assert_eq!(quote.change, 2.1);
    assert_eq!(quote.change_percent, "1.1331%");
}

#[tokio::test]
async fn alpha_vantage_throttling_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = AlphaVantageClient::with_client(server.uri(), "av-key", reqwest::Client::new());
    let err = client.get_global_quote("AAPL").await.unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn market_data_client_combines_history_and_quote() {
    let server = MockServer::start().await;
    mock_chart(&server).await;
    mock_global_quote(&server).await;

    let gateway: Arc<dyn MarketDataGateway> = Arc::new(MarketDataClient::new(
        YahooHistoryClient::with_client(server.uri(), reqwest::Client::new()),
        AlphaVantageClient::with_client(server.uri(), "av-key", reqwest::Client::new()),
    ));

    assert_eq!(gateway.get_history("AAPL", 65).await.unwrap().len(), 2);
    assert_eq!(gateway.get_quote("AAPL").await.unwrap().symbol, "AAPL");
}

#[tokio::test]
async fn fmp_movers_union_skips_failed_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/stock_market/gainers"))
        .and(query_param("apikey", "fmp-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "symbol": "SOUN", "changesPercentage": 18.2 },
            { "symbol": "aapl" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/stock_market/losers"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/stock_market/actives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ticker": "AAPL" },
            { "ticker": "NVDA" },
            { "name": "no symbol" }
        ])))
        .mount(&server)
        .await;

    let client = Arc::new(FmpClient::with_client(
        server.uri(),
        "fmp-key",
        reqwest::Client::new(),
    ));
    assert!(client.get_movers(MoverList::Losers).await.is_err());

    let source = FmpMoversSource::new(client);
    let candidates = source.get_candidates().await.unwrap();
    assert_eq!(candidates, vec!["SOUN", "AAPL", "NVDA"]);
}

#[tokio::test]
async fn fmp_exchange_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/symbol/NASDAQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "symbol": "AAPL", "exchange": "NASDAQ" },
            { "symbol": "MSFT", "exchange": "NASDAQ" }
        ])))
        .mount(&server)
        .await;

    let client = Arc::new(FmpClient::with_client(
        server.uri(),
        "fmp-key",
        reqwest::Client::new(),
    ));
    let source = FmpExchangeSource::new(client, "NASDAQ");
    assert_eq!(source.get_candidates().await.unwrap(), vec!["AAPL", "MSFT"]);
}

#[tokio::test]
async fn fmp_rows_with_symbol_and_ticker_keep_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/stock_market/actives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "symbol": "AAPL", "ticker": "AAPL" },
            { "symbol": "TSLA", "ticker": "TSLA.OLD" },
            { "ticker": "NVDA" }
        ])))
        .mount(&server)
        .await;

    let client = FmpClient::with_client(server.uri(), "fmp-key", reqwest::Client::new());
    let symbols = client.get_movers(MoverList::Actives).await.unwrap();
    assert_eq!(symbols, vec!["AAPL", "TSLA", "NVDA"]);
}

fn sample_report() -> SignalReport {
    let bars = create_test_bars(65);
    let quote = Quote::new("AAPL", 100.0, 1_000_000);
    let (signals, indicators) =
        SignalEngine::evaluate_with_indicators(&bars, &quote, &ThresholdConfig::default())
            .expect("enough bars");
    assert_eq!(signals.as_slice(), &[Signal::VolumeSpike]);
    SignalReport::new("AAPL", &quote, indicators, signals)
}

#[tokio::test]
async fn discord_webhook_receives_rendered_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_partial_json(json!({ "username": "Market Monitor" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = DiscordNotifier::new(format!("{}/hook", server.uri()));
    notifier.send(&sample_report()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let content = body["content"].as_str().unwrap();
    assert!(content.contains("FULL ANALYSIS: AAPL"));
    assert!(content.contains("Abnormal Volume Spike"));
}

#[tokio::test]
async fn discord_webhook_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let notifier = DiscordNotifier::new(format!("{}/hook", server.uri()));
    let err = notifier.send(&sample_report()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Http { status: 500, .. }));
}

#[tokio::test]
async fn bootstrap_wires_configured_sources() {
    let watchlist = Config::from_lookup(|key| match key {
        "ALPHA_VANTAGE_API_KEY" => Some("av".to_string()),
        "DISCORD_WEBHOOK_URL" => Some("http://localhost/hook".to_string()),
        "CANDIDATE_SOURCE" => Some("watchlist".to_string()),
        "WATCHLIST" => Some("aapl,msft".to_string()),
        _ => None,
    })
    .unwrap();
    let source = build_candidate_source(&watchlist).unwrap();
    assert_eq!(source.name(), "watchlist");
    assert_eq!(source.get_candidates().await.unwrap(), vec!["AAPL", "MSFT"]);

    let all = Config::from_lookup(|key| match key {
        "ALPHA_VANTAGE_API_KEY" => Some("av".to_string()),
        "DISCORD_WEBHOOK_URL" => Some("http://localhost/hook".to_string()),
        "FMP_API_KEY" => Some("fmp".to_string()),
        "CANDIDATE_SOURCE" => Some("all".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(build_candidate_source(&all).unwrap().name(), "composite");

    let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
    let scheduler = build_scheduler(&all, metrics).unwrap();
    assert_eq!(scheduler.config().lookback_days, 65);
}
