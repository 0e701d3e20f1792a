//! Ticker normalization
//!
//! Maps a user-supplied symbol and exchange label to the identifier the
//! market-data provider expects (`TCS` on `NSE` becomes `TCS.NS`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchanges with a known provider suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// National Stock Exchange of India
    Nse,
    /// Bombay Stock Exchange
    Bse,
    /// NASDAQ
    Nasdaq,
    /// New York Stock Exchange
    Nyse,
    /// Anything else, kept as given
    Other(String),
}

impl Exchange {
    /// Match a label case-insensitively; never fails
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "NSE" => Self::Nse,
            "BSE" => Self::Bse,
            "NASDAQ" => Self::Nasdaq,
            "NYSE" => Self::Nyse,
            _ => Self::Other(label.to_string()),
        }
    }

    /// Provider suffix appended to the symbol
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Nse => ".NS",
            Self::Bse => ".BO",
            Self::Nasdaq | Self::Nyse | Self::Other(_) => "",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nse => f.write_str("NSE"),
            Self::Bse => f.write_str("BSE"),
            Self::Nasdaq => f.write_str("NASDAQ"),
            Self::Nyse => f.write_str("NYSE"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// Provider identifier for `symbol` listed on `exchange_label`
pub fn normalize(symbol: &str, exchange_label: &str) -> String {
    let suffix = Exchange::from_label(exchange_label).suffix();
    format!("{}{suffix}", symbol.to_uppercase())
}

/// A single instrument as requested by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentRef {
    /// Symbol as typed
    pub symbol: String,
    /// Exchange label as typed
    pub exchange_label: String,
    /// Provider identifier
    pub normalized_id: String,
}

impl InstrumentRef {
    /// Build the reference, normalizing the identifier
    pub fn new(symbol: impl Into<String>, exchange_label: impl Into<String>) -> Self {
        let symbol = symbol.into();
        let exchange_label = exchange_label.into();
        let normalized_id = normalize(&symbol, &exchange_label);
        Self {
            symbol,
            exchange_label,
            normalized_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_known_exchanges() {
        assert_eq!(normalize("tcs", "nse"), "TCS.NS");
        assert_eq!(normalize("reliance", "BSE"), "RELIANCE.BO");
        assert_eq!(normalize("AAPL", "NASDAQ"), "AAPL");
        assert_eq!(normalize("ibm", "nyse"), "IBM");
    }

    #[test]
    fn test_normalize_unknown_exchange_has_no_suffix() {
        assert_eq!(normalize("vod", "LSE"), "VOD");
        assert_eq!(normalize("x", ""), "X");
    }

    #[test]
    fn test_suffix_table_for_any_symbol() {
        for symbol in ["a", "Brk-B", "m&m", "0700"] {
            for (label, suffix) in [("NSE", ".NS"), ("bse", ".BO"), ("Nasdaq", ""), ("NYSE", "")] {
                assert_eq!(normalize(symbol, label), format!("{}{suffix}", symbol.to_uppercase()));
            }
        }
    }

    #[test]
    fn test_instrument_ref() {
        let inst = InstrumentRef::new("infy", "nse");
        assert_eq!(inst.symbol, "infy");
        assert_eq!(inst.exchange_label, "nse");
        assert_eq!(inst.normalized_id, "INFY.NS");
    }

    #[test]
    fn test_exchange_display_keeps_unknown_label() {
        assert_eq!(Exchange::from_label("nse").to_string(), "NSE");
        assert_eq!(Exchange::from_label("Xetra").to_string(), "Xetra");
    }
}
