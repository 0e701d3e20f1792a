//! Alpha Vantage company-overview client

use crate::error::{BotError, Result};
use crate::metrics::{MetricName, MetricValue, MetricsFetcher, MetricsRecord};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

const PROVIDER: &str = "Alpha Vantage";
const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Overview fields per metric. Debt/Equity, gross margin and free cash flow
/// are not part of the overview and stay unavailable.
const FIELD_MAP: [(MetricName, &str); 7] = [
    (MetricName::PriceToEarnings, "PERatio"),
    (MetricName::PriceToBook, "PriceToBookRatio"),
    (MetricName::EarningsPerShare, "EPS"),
    (MetricName::DividendYield, "DividendYield"),
    (MetricName::NetMargin, "ProfitMargin"),
    (MetricName::OperatingMargin, "OperatingMarginTTM"),
    (MetricName::Revenue, "RevenueTTM"),
];

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl AlphaVantageClient {
    /// Create a client with an API key and a requests-per-minute budget
    /// (the free tier allows 5)
    pub fn new(api_key: impl Into<String>, rate_limit: u32, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(BotError::Config(
                "ALPHA_VANTAGE_API_KEY environment variable not set".to_string(),
            ));
        }

        let per_minute = NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            rate_limiter,
        })
    }

    /// Fetch the raw `OVERVIEW` document
    pub async fn company_overview(&self, symbol: &str) -> Result<Value> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "OVERVIEW"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::provider(
                PROVIDER,
                format!("HTTP error: {}", response.status()),
            ));
        }

        let data: Value = response.json().await?;

        if let Some(error) = data.get("Error Message") {
            return Err(BotError::provider(PROVIDER, error.to_string()));
        }
        if data.get("Note").is_some() || data.get("Information").is_some() {
            return Err(BotError::provider(PROVIDER, "rate limit exceeded"));
        }

        Ok(data)
    }
}

#[async_trait]
impl MetricsFetcher for AlphaVantageClient {
    #[instrument(skip(self))]
    async fn fetch(&self, ticker: &str) -> Result<MetricsRecord> {
        let overview = self.company_overview(&overview_symbol(ticker)).await?;
        let record = parse_overview(ticker, &overview)?;
        debug!(available = record.available_count(), "Parsed company overview");
        Ok(record)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

/// Alpha Vantage lists Indian equities only under the `.BSE` suffix, so the
/// Yahoo-style `.NS` and `.BO` suffixes are rewritten. Other tickers pass
/// through.
pub fn overview_symbol(ticker: &str) -> String {
    [".NS", ".BO"]
        .iter()
        .find_map(|suffix| ticker.strip_suffix(suffix))
        .map_or_else(|| ticker.to_string(), |base| format!("{base}.BSE"))
}

/// Map an `OVERVIEW` document onto a metrics record
///
/// Alpha Vantage reports every number as a string and uses `"None"` or
/// `"-"` for missing values.
pub fn parse_overview(ticker: &str, overview: &Value) -> Result<MetricsRecord> {
    // Unknown symbols yield an empty object
    if overview.get("Symbol").is_none() {
        return Err(BotError::provider(PROVIDER, format!("no data for {ticker}")));
    }

    let mut record = MetricsRecord::new(ticker);
    for (metric, field) in FIELD_MAP {
        let value = match overview.get(field).and_then(Value::as_str) {
            None | Some("None" | "-" | "") => MetricValue::Unavailable,
            Some(raw) => raw
                .parse::<f64>()
                .map_or_else(|_| MetricValue::Text(raw.to_string()), MetricValue::Number),
        };
        record.set(metric, value);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_overview() {
        let overview = json!({
            "Symbol": "IBM",
            "PERatio": "22.4",
            "PriceToBookRatio": "7.1",
            "EPS": "9.08",
            "DividendYield": "None",
            "ProfitMargin": "0.121",
            "OperatingMarginTTM": "-",
            "RevenueTTM": "62753001000"
        });

        let record = parse_overview("IBM", &overview).unwrap();
        assert_eq!(record.get(MetricName::PriceToEarnings), &MetricValue::Number(22.4));
        assert_eq!(record.get(MetricName::Revenue), &MetricValue::Number(62_753_001_000.0));
        assert_eq!(record.get(MetricName::DividendYield), &MetricValue::Unavailable);
        assert_eq!(record.get(MetricName::OperatingMargin), &MetricValue::Unavailable);
        assert_eq!(record.get(MetricName::FreeCashFlow), &MetricValue::Unavailable);
        assert_eq!(record.available_count(), 5);
    }

    #[test]
    fn test_overview_symbol_maps_indian_suffixes() {
        assert_eq!(overview_symbol("TCS.NS"), "TCS.BSE");
        assert_eq!(overview_symbol("RELIANCE.BO"), "RELIANCE.BSE");
        assert_eq!(overview_symbol("IBM"), "IBM");
        assert_eq!(overview_symbol("M&M.NS"), "M&M.BSE");
    }

    #[test]
    fn test_empty_overview_is_provider_error() {
        assert!(matches!(
            parse_overview("NOPE", &json!({})),
            Err(BotError::Provider { .. })
        ));
    }

    #[test]
    fn test_client_requires_key() {
        let result = AlphaVantageClient::new("", 5, Duration::from_secs(5));
        assert!(matches!(result, Err(BotError::Config(_))));
    }
}
