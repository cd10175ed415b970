use crate::domain::entities::price_series::PriceSeries;
use crate::domain::error::DomainError;
use crate::domain::values::history_range::HistoryRange;
use crate::domain::values::ticker::Ticker;

/// Source of daily price history.
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `ticker` over `range`, oldest first.
    async fn history(&self, ticker: &Ticker, range: HistoryRange) -> Result<PriceSeries, DomainError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
