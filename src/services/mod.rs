//! External collaborators: market data, candidate lists, alert delivery.

pub mod alpha_vantage;
pub mod candidates;
pub mod discord;
pub mod error;
pub mod fmp;
pub mod market_data;
pub mod notifier;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageClient;
pub use candidates::{CandidateSource, CompositeSource, WatchlistSource};
pub use discord::DiscordNotifier;
pub use error::ServiceError;
pub use fmp::{FmpClient, FmpExchangeSource, FmpMoversSource, MoverList};
pub use market_data::{MarketDataClient, MarketDataGateway};
pub use notifier::Notifier;
pub use yahoo::YahooHistoryClient;
