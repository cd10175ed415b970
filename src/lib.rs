pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::analyze::{AnalyzeOptions, AnalyzeUseCase, Analysis, ScanReport};
use crate::application::chart::{ChartReport, ChartUseCase};
use crate::application::history::HistoryUseCase;
use crate::application::options_flow::{FlowFilter, FlowReport, OptionsFlowUseCase};
use crate::config::Settings;
use crate::domain::entities::signal_record::SignalRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::ports::options_flow::OptionsFlowProvider;
use crate::domain::ports::signal_repository::SignalRepository;
use crate::domain::values::history_range::HistoryRange;
use crate::domain::values::ticker::Ticker;
use crate::infrastructure::market_data::yahoo::YahooMarketData;
use crate::infrastructure::options::polygon::PolygonOptionsFlow;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::signal_repo::SqliteSignalRepo;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::sync::Arc;

pub struct DeltaGhost {
    chart_uc: ChartUseCase,
    analyze_uc: AnalyzeUseCase,
    options_uc: OptionsFlowUseCase,
    history_uc: HistoryUseCase,
}

impl DeltaGhost {
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        let market: Arc<dyn MarketDataProvider> = Arc::new(YahooMarketData::new(
            settings.yahoo_url.clone(),
            settings.http_timeout,
        ));
        let options: Arc<dyn OptionsFlowProvider> = Arc::new(PolygonOptionsFlow::new(
            settings.options_url.clone(),
            settings.options_api_key.clone(),
            settings.http_timeout,
        ));

        Self::with_providers(&settings.db_path, market, options)
    }

    pub fn with_providers(
        db_path: &str,
        market: Arc<dyn MarketDataProvider>,
        options: Arc<dyn OptionsFlowProvider>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        if db_path != ":memory:" {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        }
        run_migrations(&conn)?;
        tracing::debug!(db_path, "signal journal ready");

        let signals: Arc<dyn SignalRepository> = Arc::new(SqliteSignalRepo::new(conn));

        Ok(Self {
            chart_uc: ChartUseCase::new(market.clone()),
            analyze_uc: AnalyzeUseCase::new(market, signals.clone()),
            options_uc: OptionsFlowUseCase::new(options),
            history_uc: HistoryUseCase::new(signals),
        })
    }

    // Delegating methods
    pub async fn chart(&self, tickers: &[Ticker], range: HistoryRange) -> Result<ChartReport, DomainError> {
        self.chart_uc.execute(tickers, range).await
    }

    pub async fn analyze(&self, ticker: &Ticker, options: &AnalyzeOptions) -> Result<Analysis, DomainError> {
        self.analyze_uc.analyze(ticker, options).await
    }

    pub async fn scan(&self, tickers: &[Ticker], options: &AnalyzeOptions) -> Result<ScanReport, DomainError> {
        self.analyze_uc.scan(tickers, options).await
    }

    pub async fn options_flow(&self, underlying: &Ticker, filter: &FlowFilter) -> Result<FlowReport, DomainError> {
        self.options_uc.execute(underlying, filter).await
    }

    pub fn history(
        &self,
        ticker: Option<Ticker>,
        since: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<SignalRecord>, DomainError> {
        self.history_uc.list(ticker, since, limit)
    }

    pub fn signal(&self, id: &str) -> Result<SignalRecord, DomainError> {
        self.history_uc.get(id)
    }
}
