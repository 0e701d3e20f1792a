//! Fundamental metrics record and the fetcher seam
//!
//! A [`MetricsRecord`] always carries every [`MetricName`]; a field the
//! provider did not return holds [`MetricValue::Unavailable`] so the prompt
//! listing has a fixed shape.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of metrics embedded in every prompt, in listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricName {
    PriceToEarnings,
    PriceToBook,
    EarningsPerShare,
    DebtToEquity,
    DividendYield,
    GrossMargin,
    NetMargin,
    OperatingMargin,
    Revenue,
    FreeCashFlow,
}

impl MetricName {
    /// All metrics in listing order
    pub const ALL: [MetricName; 10] = [
        MetricName::PriceToEarnings,
        MetricName::PriceToBook,
        MetricName::EarningsPerShare,
        MetricName::DebtToEquity,
        MetricName::DividendYield,
        MetricName::GrossMargin,
        MetricName::NetMargin,
        MetricName::OperatingMargin,
        MetricName::Revenue,
        MetricName::FreeCashFlow,
    ];

    /// Label used in the prompt listing
    pub fn label(self) -> &'static str {
        match self {
            MetricName::PriceToEarnings => "P/E",
            MetricName::PriceToBook => "P/B",
            MetricName::EarningsPerShare => "EPS",
            MetricName::DebtToEquity => "Debt/Equity",
            MetricName::DividendYield => "Dividend Yield",
            MetricName::GrossMargin => "Gross Margin",
            MetricName::NetMargin => "Net Margin",
            MetricName::OperatingMargin => "Operating Margin",
            MetricName::Revenue => "Revenue",
            MetricName::FreeCashFlow => "Free Cash Flow",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A metric value as reported by a provider
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    #[default]
    Unavailable,
}

impl MetricValue {
    /// Whether the provider supplied a value
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

/// Metrics for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    ticker: String,
    values: Vec<MetricValue>,
}

impl MetricsRecord {
    /// A record with every metric unavailable
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            values: vec![MetricValue::Unavailable; MetricName::ALL.len()],
        }
    }

    /// Provider identifier the metrics belong to
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Set a metric value
    pub fn set(&mut self, name: MetricName, value: MetricValue) {
        self.values[name.index()] = value;
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, name: MetricName, value: MetricValue) -> Self {
        self.set(name, value);
        self
    }

    /// Value of a metric
    pub fn get(&self, name: MetricName) -> &MetricValue {
        &self.values[name.index()]
    }

    /// Metrics in listing order
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, &MetricValue)> {
        MetricName::ALL.iter().copied().zip(self.values.iter())
    }

    /// Number of metrics the provider actually supplied
    pub fn available_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_available()).count()
    }

    /// Newline-joined `name: value` listing, ticker first
    pub fn to_listing(&self) -> String {
        std::iter::once(format!("Ticker: {}", self.ticker))
            .chain(self.iter().map(|(name, value)| format!("{}: {value}", name.label())))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Source of fundamental metrics
#[async_trait]
pub trait MetricsFetcher: Send + Sync {
    /// Fetch metrics for a provider identifier
    async fn fetch(&self, ticker: &str) -> Result<MetricsRecord>;

    /// Provider name for logs and error messages
    fn name(&self) -> &str;
}
