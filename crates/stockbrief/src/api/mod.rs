//! Market-data provider clients

pub mod alpha_vantage;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageClient;
pub use yahoo::YahooFinanceClient;

use crate::config::{BotConfig, DataProvider};
use crate::error::Result;
use crate::metrics::MetricsFetcher;
use std::sync::Arc;

/// Build the metrics fetcher selected by the configuration
pub fn fetcher_from_config(config: &BotConfig) -> Result<Arc<dyn MetricsFetcher>> {
    match config.data_provider {
        DataProvider::Yahoo => Ok(Arc::new(YahooFinanceClient::new(config.data_timeout)?)),
        DataProvider::AlphaVantage => {
            let key = config.alpha_vantage_api_key.clone().unwrap_or_default();
            Ok(Arc::new(AlphaVantageClient::new(
                key,
                config.alpha_vantage_rate_limit,
                config.data_timeout,
            )?))
        }
    }
}
