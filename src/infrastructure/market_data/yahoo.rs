use crate::domain::entities::price_series::{PriceBar, PriceSeries};
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::values::history_range::HistoryRange;
use crate::domain::values::ticker::Ticker;
use crate::infrastructure::http::build_client;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                  AppleWebKit/537.36 (KHTML, like Gecko) \
                                  Chrome/120.0.0.0 Safari/537.36";

/// Daily history from the Yahoo Finance v8 chart API (no auth required).
pub struct YahooMarketData {
    base_url: String,
    client: reqwest::Client,
}

impl YahooMarketData {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(BROWSER_USER_AGENT, timeout),
        }
    }

    fn chart_url(&self, ticker: &Ticker) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, ticker)
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, serde::Deserialize)]
struct ChartMeta {
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
    #[serde(default)]
    adjclose: Vec<AdjCloseColumn>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, serde::Deserialize)]
struct AdjCloseColumn {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Parses a chart API body into a series. Bars without a close are dropped;
/// a missing or short adjusted-close column leaves `adj_close` empty for
/// the affected bars.
pub fn parse_chart(ticker: &Ticker, body: &str) -> Result<PriceSeries, DomainError> {
    let data: ChartResponse =
        serde_json::from_str(body).map_err(|e| DomainError::Parse(format!("Chart JSON: {e}")))?;

    if let Some(err) = data.chart.error {
        let code = err.code.unwrap_or_default();
        let description = err.description.unwrap_or_default();
        if code.eq_ignore_ascii_case("not found") {
            return Err(DomainError::NotFound(format!("{ticker}: {description}")));
        }
        return Err(DomainError::Parse(format!("Yahoo error for {ticker}: {code} {description}")));
    }

    let chart = data
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DomainError::NotFound(format!("No chart results for {ticker}")))?;

    let quote = chart.indicators.quote.into_iter().next().unwrap_or_default();
    let adj = chart
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|c| c.adjclose)
        .unwrap_or_default();

    let mut bars = Vec::with_capacity(chart.timestamp.len());
    for (i, ts) in chart.timestamp.iter().enumerate() {
        let Some(close) = at(&quote.close, i) else {
            continue;
        };
        let Some(timestamp) = DateTime::<Utc>::from_timestamp(*ts, 0) else {
            tracing::debug!(ticker = %ticker, ts, "skipping bar with out-of-range timestamp");
            continue;
        };
        bars.push(PriceBar {
            timestamp,
            open: at(&quote.open, i),
            high: at(&quote.high, i),
            low: at(&quote.low, i),
            close,
            adj_close: at(&adj, i),
            volume: quote.volume.get(i).copied().flatten(),
        });
    }

    Ok(PriceSeries::new(ticker.clone(), chart.meta.currency, bars))
}

fn at(col: &[Option<f64>], i: usize) -> Option<f64> {
    col.get(i).copied().flatten()
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    async fn history(&self, ticker: &Ticker, range: HistoryRange) -> Result<PriceSeries, DomainError> {
        let url = self.chart_url(ticker);
        tracing::debug!(%url, range = %range, "requesting chart");

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range.as_str()), ("interval", "1d"), ("events", "div,split")])
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        if !status.is_success() {
            // 404 bodies still carry a chart.error describing the symbol problem
            if status == reqwest::StatusCode::NOT_FOUND {
                return match parse_chart(ticker, &body) {
                    Err(e @ DomainError::NotFound(_)) => Err(e),
                    _ => Err(DomainError::NotFound(format!("Unknown ticker: {ticker}"))),
                };
            }
            return Err(DomainError::Network(format!(
                "Yahoo API returned {status} for {ticker}"
            )));
        }

        parse_chart(ticker, &body)
    }

    fn name(&self) -> &str {
        "yahoo_finance"
    }
}
