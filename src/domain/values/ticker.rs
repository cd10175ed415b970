use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_TICKER_LEN: usize = 15;

/// An exchange symbol, trimmed and upper-cased (e.g. `AAPL`, `BRK-B`, `^GSPC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(raw: &str) -> Result<Self, String> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err("Ticker must not be empty".into());
        }
        if symbol.len() > MAX_TICKER_LEN {
            return Err(format!(
                "Ticker too long ({} chars, max {MAX_TICKER_LEN}): {symbol}",
                symbol.len()
            ));
        }
        if let Some(bad) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(*c, '.' | '-' | '^' | '=')))
        {
            return Err(format!("Invalid character '{bad}' in ticker: {symbol}"));
        }
        Ok(Ticker(symbol))
    }

    /// Split a comma-separated list like `"aapl, tsla,,AAPL"` into unique tickers,
    /// keeping first-seen order.
    pub fn parse_list(input: &str) -> Result<Vec<Ticker>, String> {
        let mut tickers: Vec<Ticker> = Vec::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let ticker = Ticker::new(part)?;
            if !tickers.contains(&ticker) {
                tickers.push(ticker);
            }
        }
        if tickers.is_empty() {
            return Err(format!("No tickers found in input: '{input}'"));
        }
        Ok(tickers)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(Ticker::new("  tsla ").unwrap().as_str(), "TSLA");
    }

    #[test]
    fn test_accepts_index_and_class_symbols() {
        assert!(Ticker::new("^GSPC").is_ok());
        assert!(Ticker::new("BRK-B").is_ok());
        assert!(Ticker::new("EURUSD=X").is_ok());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Ticker::new("").is_err());
        assert!(Ticker::new("AA PL").is_err());
        assert!(Ticker::new("A/B").is_err());
        assert!(Ticker::new("ABCDEFGHIJKLMNOP").is_err());
    }

    #[test]
    fn test_parse_list_dedupes_in_order() {
        let list = Ticker::parse_list("aapl, TSLA,, aapl ,nvda").unwrap();
        let symbols: Vec<&str> = list.iter().map(|t| t.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "TSLA", "NVDA"]);
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(Ticker::parse_list(" , ,").is_err());
    }
}
