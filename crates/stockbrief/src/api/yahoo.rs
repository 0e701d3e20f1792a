//! Yahoo Finance fundamentals client
//!
//! Wraps [`yahoo::YahooConnector::get_ticker_info`], which performs the
//! cookie and crumb handshake itself and refreshes the crumb when Yahoo
//! rejects it.

use crate::error::{BotError, Result};
use crate::metrics::{MetricName, MetricValue, MetricsFetcher, MetricsRecord};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use yahoo_finance_api as yahoo;

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance client
pub struct YahooFinanceClient {
    // `get_ticker_info` caches the session crumb and needs `&mut self`
    connector: Mutex<yahoo::YahooConnector>,
}

impl YahooFinanceClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let connector = yahoo::YahooConnector::builder()
            .timeout(timeout)
            .build()
            .map_err(yahoo_error)?;

        Ok(Self {
            connector: Mutex::new(connector),
        })
    }

    /// Fetch the raw quote summary
    pub async fn quote_summary(&self, ticker: &str) -> Result<yahoo::YQuoteSummary> {
        let mut connector = self.connector.lock().await;
        connector.get_ticker_info(ticker).await.map_err(yahoo_error)
    }
}

#[async_trait]
impl MetricsFetcher for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn fetch(&self, ticker: &str) -> Result<MetricsRecord> {
        let summary = self.quote_summary(ticker).await?;
        let record = record_from_summary(ticker, &summary)?;
        debug!(available = record.available_count(), "Parsed quote summary");
        Ok(record)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

fn yahoo_error(err: yahoo::YahooError) -> BotError {
    BotError::provider(PROVIDER, err.to_string())
}

fn api_error(description: Option<&String>, code: Option<&String>) -> BotError {
    let message = description
        .or(code)
        .map_or("unknown error", String::as_str);
    BotError::provider(PROVIDER, message)
}

fn number(value: Option<f64>) -> MetricValue {
    match value {
        Some(n) if n.is_finite() => MetricValue::Number(n),
        _ => MetricValue::Unavailable,
    }
}

fn amount(value: Option<i64>) -> MetricValue {
    value.map_or(MetricValue::Unavailable, |n| MetricValue::Number(n as f64))
}

/// Map a quote summary onto a metrics record
///
/// Absent modules and fields become [`MetricValue::Unavailable`]; an error
/// envelope or an empty result set is a provider error.
pub fn record_from_summary(ticker: &str, summary: &yahoo::YQuoteSummary) -> Result<MetricsRecord> {
    if let Some(error) = summary.finance.as_ref().and_then(|f| f.error.as_ref()) {
        return Err(api_error(error.description.as_ref(), error.code.as_ref()));
    }
    let quote_summary = summary
        .quote_summary
        .as_ref()
        .ok_or_else(|| BotError::provider(PROVIDER, format!("no data for {ticker}")))?;
    if let Some(error) = &quote_summary.error {
        return Err(api_error(error.description.as_ref(), error.code.as_ref()));
    }
    let data = quote_summary
        .result
        .as_ref()
        .and_then(|r| r.first())
        .ok_or_else(|| BotError::provider(PROVIDER, format!("no data for {ticker}")))?;

    let detail = data.summary_detail.as_ref();
    let stats = data.default_key_statistics.as_ref();
    let financial = data.financial_data.as_ref();

    Ok(MetricsRecord::new(ticker)
        .with(MetricName::PriceToEarnings, number(detail.and_then(|d| d.trailing_pe)))
        .with(MetricName::PriceToBook, number(stats.and_then(|s| s.price_to_book)))
        .with(MetricName::EarningsPerShare, number(stats.and_then(|s| s.trailing_eps)))
        .with(MetricName::DebtToEquity, number(financial.and_then(|f| f.debt_to_equity)))
        .with(MetricName::DividendYield, number(detail.and_then(|d| d.dividend_yield)))
        .with(MetricName::GrossMargin, number(financial.and_then(|f| f.gross_margins)))
        .with(MetricName::NetMargin, number(financial.and_then(|f| f.profit_margins)))
        .with(MetricName::OperatingMargin, number(financial.and_then(|f| f.operating_margins)))
        .with(MetricName::Revenue, amount(financial.and_then(|f| f.total_revenue)))
        .with(MetricName::FreeCashFlow, amount(financial.and_then(|f| f.free_cashflow))))
}
