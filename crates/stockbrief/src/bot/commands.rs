//! Command parsing for the chat surface

use crate::error::{BotError, Result};

/// Usage hint returned for malformed `/analyze` calls
pub const ANALYZE_USAGE: &str = "Usage: /analyze <TICKER> <EXCHANGE>";

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Usage text
    Start,
    /// Same reply as `/start`
    Help,
    /// Full analysis of one instrument
    Analyze { symbol: String, exchange: String },
    /// Summaries for the whole watchlist
    Batch,
}

impl Command {
    /// Parse a chat message
    ///
    /// Returns `Ok(None)` for plain text and unknown commands, which the bot
    /// ignores. A `@botname` suffix on the command word is dropped, and
    /// arguments past the second are ignored.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let input = input.trim();
        let Some(rest) = input.strip_prefix('/') else {
            return Ok(None);
        };

        let mut parts = rest.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(None);
        };
        let cmd = word.split('@').next().unwrap_or_default().to_lowercase();

        let command = match cmd.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "batch" => Command::Batch,
            "analyze" => {
                let (Some(symbol), Some(exchange)) = (parts.next(), parts.next()) else {
                    return Err(BotError::UserInput(ANALYZE_USAGE.to_string()));
                };
                Command::Analyze {
                    symbol: symbol.to_string(),
                    exchange: exchange.to_string(),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(command))
    }

    /// Command word without arguments, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Analyze { .. } => "analyze",
            Command::Batch => "batch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/start").unwrap(), Some(Command::Start));
        assert_eq!(Command::parse("/help").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("  /batch  ").unwrap(), Some(Command::Batch));
        assert_eq!(Command::parse("/START").unwrap(), Some(Command::Start));
    }

    #[test]
    fn test_parse_analyze() {
        assert_eq!(
            Command::parse("/analyze tcs nse").unwrap(),
            Some(Command::Analyze {
                symbol: "tcs".to_string(),
                exchange: "nse".to_string()
            })
        );
    }

    #[test]
    fn test_parse_extra_args_ignored() {
        assert_eq!(
            Command::parse("/analyze AAPL NASDAQ please").unwrap(),
            Some(Command::Analyze {
                symbol: "AAPL".to_string(),
                exchange: "NASDAQ".to_string()
            })
        );
    }

    #[test]
    fn test_parse_bot_suffix() {
        assert_eq!(
            Command::parse("/analyze@stockbrief_bot INFY NSE").unwrap(),
            Some(Command::Analyze {
                symbol: "INFY".to_string(),
                exchange: "NSE".to_string()
            })
        );
        assert_eq!(Command::parse("/batch@stockbrief_bot").unwrap(), Some(Command::Batch));
    }

    #[test]
    fn test_parse_analyze_missing_args() {
        for input in ["/analyze", "/analyze TCS"] {
            let err = Command::parse(input).unwrap_err();
            assert!(matches!(err, BotError::UserInput(_)));
            assert!(err.to_string().contains(ANALYZE_USAGE));
        }
    }

    #[test]
    fn test_parse_ignores_other_input() {
        assert_eq!(Command::parse("hello").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("/").unwrap(), None);
        assert_eq!(Command::parse("/portfolio").unwrap(), None);
    }
}
