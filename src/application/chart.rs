use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::values::history_range::HistoryRange;
use crate::domain::values::ticker::Ticker;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;

pub struct ChartUseCase {
    market: Arc<dyn MarketDataProvider>,
}

#[derive(Debug, Serialize)]
pub struct ChartReport {
    pub generated_at: DateTime<Utc>,
    pub range: HistoryRange,
    pub series: Vec<ChartSeries>,
    /// One `"<TICKER>: <reason>"` line per ticker that could not be fetched.
    pub fetch_errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChartSeries {
    pub ticker: Ticker,
    pub currency: Option<String>,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl ChartUseCase {
    pub fn new(market: Arc<dyn MarketDataProvider>) -> Self {
        Self { market }
    }

    /// Close-price history for each ticker. A failed ticker is reported in
    /// `fetch_errors` and does not stop the others.
    pub async fn execute(
        &self,
        tickers: &[Ticker],
        range: HistoryRange,
    ) -> Result<ChartReport, DomainError> {
        if tickers.is_empty() {
            return Err(DomainError::InvalidInput("At least one ticker is required".into()));
        }

        let mut series = Vec::with_capacity(tickers.len());
        let mut fetch_errors = Vec::new();

        for ticker in tickers {
            tracing::info!(ticker = %ticker, range = %range, provider = self.market.name(), "fetching price history");
            match self.market.history(ticker, range).await {
                Ok(history) => series.push(ChartSeries {
                    points: history
                        .bars
                        .iter()
                        .map(|b| ChartPoint {
                            date: b.date(),
                            close: b.effective_close(),
                        })
                        .collect(),
                    ticker: history.ticker,
                    currency: history.currency,
                }),
                Err(e) => {
                    tracing::warn!("Failed to fetch {ticker}: {e}");
                    fetch_errors.push(format!("{ticker}: {e}"));
                }
            }
        }

        Ok(ChartReport {
            generated_at: Utc::now(),
            range,
            series,
            fetch_errors,
        })
    }
}
