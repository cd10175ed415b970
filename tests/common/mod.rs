//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use delta_ghost::domain::entities::option_contract::OptionContract;
use delta_ghost::domain::entities::price_series::{PriceBar, PriceSeries};
use delta_ghost::domain::error::DomainError;
use delta_ghost::domain::ports::market_data::MarketDataProvider;
use delta_ghost::domain::ports::options_flow::OptionsFlowProvider;
use delta_ghost::domain::values::history_range::HistoryRange;
use delta_ghost::domain::values::option_kind::OptionKind;
use delta_ghost::domain::values::ticker::Ticker;
use delta_ghost::DeltaGhost;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Market data served from fixed close lists. Unknown tickers are `NotFound`;
/// tickers in `failing` return a network error.
#[derive(Default)]
pub struct StubMarketData {
    closes: HashMap<String, Vec<f64>>,
    failing: Vec<String>,
    pub requests: Mutex<Vec<(String, HistoryRange)>>,
}

impl StubMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ticker: &str, closes: Vec<f64>) -> Self {
        self.closes.insert(ticker.to_string(), closes);
        self
    }

    pub fn failing(mut self, ticker: &str) -> Self {
        self.failing.push(ticker.to_string());
        self
    }
}

#[async_trait]
impl MarketDataProvider for StubMarketData {
    async fn history(&self, ticker: &Ticker, range: HistoryRange) -> Result<PriceSeries, DomainError> {
        self.requests
            .lock()
            .unwrap()
            .push((ticker.to_string(), range));

        if self.failing.iter().any(|t| t == ticker.as_str()) {
            return Err(DomainError::Network(format!("connection reset for {ticker}")));
        }
        let closes = self
            .closes
            .get(ticker.as_str())
            .ok_or_else(|| DomainError::NotFound(format!("Unknown ticker: {ticker}")))?;

        let start = Utc.with_ymd_and_hms(2026, 1, 5, 21, 0, 0).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, c)| PriceBar {
                timestamp: start + Duration::days(i as i64),
                open: Some(*c),
                high: Some(*c),
                low: Some(*c),
                close: *c,
                adj_close: None,
                volume: Some(1_000),
            })
            .collect();
        Ok(PriceSeries::new(ticker.clone(), Some("USD".into()), bars))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[derive(Default)]
pub struct StubOptionsFlow {
    contracts: Vec<OptionContract>,
}

impl StubOptionsFlow {
    pub fn new(contracts: Vec<OptionContract>) -> Self {
        Self { contracts }
    }
}

#[async_trait]
impl OptionsFlowProvider for StubOptionsFlow {
    async fn contracts(&self, underlying: &Ticker) -> Result<Vec<OptionContract>, DomainError> {
        Ok(self
            .contracts
            .iter()
            .filter(|c| c.underlying == underlying.as_str())
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub fn setup(market: StubMarketData) -> DeltaGhost {
    setup_with(market, StubOptionsFlow::default())
}

pub fn setup_with(market: StubMarketData, options: StubOptionsFlow) -> DeltaGhost {
    DeltaGhost::with_providers(":memory:", Arc::new(market), Arc::new(options)).unwrap()
}

pub fn ticker(s: &str) -> Ticker {
    Ticker::new(s).unwrap()
}

/// Steady climb of `n` closes starting at 100.
pub fn rising(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + i as f64).collect()
}

/// Long climb, then a shallow pullback that keeps price above its SMA
/// with RSI back under 70.
pub fn pullback_in_uptrend() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let top = *closes.last().unwrap();
    for (i, step) in [-1.0, 0.5, -1.0, 0.5, -1.0, 0.5, -1.0, 0.5].iter().enumerate() {
        closes.push(top + step - i as f64 * 0.1);
    }
    closes
}

pub fn contract(symbol: &str, kind: OptionKind, volume: u64, open_interest: Option<u64>) -> OptionContract {
    OptionContract {
        symbol: symbol.to_string(),
        underlying: "AAPL".into(),
        kind,
        strike: 200.0,
        expiry: NaiveDate::from_ymd_opt(2026, 6, 19).unwrap(),
        ask: Some(2.0),
        volume,
        open_interest,
    }
}
