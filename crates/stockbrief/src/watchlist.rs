//! Fixed instrument list analyzed by `/batch`

use crate::ticker::normalize;
use serde::{Deserialize, Serialize};

/// One watchlist instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// Display name used in prompts and summary labels
    pub name: String,
    /// Provider identifier
    pub ticker: String,
    /// Exchange label passed to the prompt
    pub exchange_label: String,
}

impl WatchlistEntry {
    /// Entry whose ticker is derived from name and exchange
    pub fn new(name: impl Into<String>, exchange_label: impl Into<String>) -> Self {
        let name = name.into();
        let exchange_label = exchange_label.into();
        Self {
            ticker: normalize(&name, &exchange_label),
            name,
            exchange_label,
        }
    }
}

/// Large-cap NSE names, in batch output order
pub const NSE_LARGE_CAPS: [&str; 7] = [
    "RELIANCE",
    "TCS",
    "INFY",
    "HDFCBANK",
    "ITC",
    "SBIN",
    "ICICIBANK",
];

/// The default batch watchlist
pub fn default_watchlist() -> Vec<WatchlistEntry> {
    NSE_LARGE_CAPS
        .iter()
        .map(|name| WatchlistEntry::new(*name, "NSE"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_watchlist_order_and_tickers() {
        let list = default_watchlist();
        let names: Vec<&str> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, NSE_LARGE_CAPS);
        assert_eq!(list[1].ticker, "TCS.NS");
        assert!(list.iter().all(|e| e.ticker.ends_with(".NS") && e.exchange_label == "NSE"));
    }
}
