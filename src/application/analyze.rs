use crate::domain::entities::signal_record::SignalRecord;
use crate::domain::error::DomainError;
use crate::domain::indicators::signal::{IndicatorColumns, IndicatorSettings, IndicatorSnapshot};
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::ports::signal_repository::SignalRepository;
use crate::domain::values::history_range::HistoryRange;
use crate::domain::values::ticker::Ticker;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;

pub struct AnalyzeUseCase {
    market: Arc<dyn MarketDataProvider>,
    signals: Arc<dyn SignalRepository>,
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub range: HistoryRange,
    pub settings: IndicatorSettings,
    /// Journal the snapshot when it carries a composite signal.
    pub record: bool,
    /// Include one row per bar in the result.
    pub include_rows: bool,
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub ticker: Ticker,
    pub range: HistoryRange,
    pub bars: usize,
    pub settings: IndicatorSettings,
    pub snapshot: IndicatorSnapshot,
    /// Id of the journaled signal, if one was stored.
    pub recorded: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<IndicatorRow>,
}

#[derive(Debug, Serialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sma: Option<f64>,
    pub rsi: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub scanned_at: DateTime<Utc>,
    pub range: HistoryRange,
    pub results: Vec<Analysis>,
    pub fetch_errors: Vec<String>,
}

impl AnalyzeUseCase {
    pub fn new(market: Arc<dyn MarketDataProvider>, signals: Arc<dyn SignalRepository>) -> Self {
        Self { market, signals }
    }

    pub async fn analyze(
        &self,
        ticker: &Ticker,
        options: &AnalyzeOptions,
    ) -> Result<Analysis, DomainError> {
        options.settings.validate().map_err(DomainError::InvalidInput)?;

        tracing::info!(ticker = %ticker, range = %options.range, "analyzing");
        let series = self.market.history(ticker, options.range).await?;
        if series.len() < options.settings.sma_window.max(options.settings.rsi_window + 1) {
            tracing::warn!(
                ticker = %ticker,
                bars = series.len(),
                "series shorter than indicator windows, signal skipped"
            );
        }

        let columns = IndicatorColumns::compute(series.closes(), &options.settings);
        let as_of = series.last_bar().map(|b| b.timestamp);
        let snapshot = IndicatorSnapshot::from_columns(&columns, as_of, &options.settings);

        let recorded = if options.record {
            match SignalRecord::from_snapshot(ticker.clone(), &snapshot) {
                Some(record) => {
                    self.signals.add_signal(&record)?;
                    tracing::info!(ticker = %ticker, signal = %record.signal, id = %record.id, "signal journaled");
                    Some(record.id)
                }
                None => None,
            }
        } else {
            None
        };

        let rows = if options.include_rows {
            series
                .bars
                .iter()
                .enumerate()
                .map(|(i, bar)| {
                    let band = columns.bands[i];
                    IndicatorRow {
                        date: bar.date(),
                        close: columns.closes[i],
                        sma: columns.sma[i],
                        rsi: columns.rsi[i],
                        upper_band: band.map(|b| b.upper),
                        lower_band: band.map(|b| b.lower),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(Analysis {
            ticker: ticker.clone(),
            range: options.range,
            bars: series.len(),
            settings: options.settings,
            snapshot,
            recorded,
            rows,
        })
    }

    /// Analyze several tickers; per-ticker failures are collected, not raised.
    /// Invalid settings still fail the whole scan.
    pub async fn scan(
        &self,
        tickers: &[Ticker],
        options: &AnalyzeOptions,
    ) -> Result<ScanReport, DomainError> {
        options.settings.validate().map_err(DomainError::InvalidInput)?;
        if tickers.is_empty() {
            return Err(DomainError::InvalidInput("At least one ticker is required".into()));
        }

        let mut results = Vec::new();
        let mut fetch_errors = Vec::new();
        for ticker in tickers {
            match self.analyze(ticker, options).await {
                Ok(analysis) => results.push(analysis),
                Err(e) => {
                    tracing::warn!("Failed to analyze {ticker}: {e}");
                    fetch_errors.push(format!("{ticker}: {e}"));
                }
            }
        }

        Ok(ScanReport {
            scanned_at: Utc::now(),
            range: options.range,
            results,
            fetch_errors,
        })
    }
}
