use crate::domain::entities::signal_record::SignalRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::signal_repository::{SignalFilter, SignalRepository};
use crate::domain::values::ticker::Ticker;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct HistoryUseCase {
    repo: Arc<dyn SignalRepository>,
}

impl HistoryUseCase {
    pub fn new(repo: Arc<dyn SignalRepository>) -> Self {
        Self { repo }
    }

    pub fn list(
        &self,
        ticker: Option<Ticker>,
        since: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<SignalRecord>, DomainError> {
        self.repo.list_signals(&SignalFilter {
            ticker,
            since,
            limit,
        })
    }

    pub fn get(&self, id: &str) -> Result<SignalRecord, DomainError> {
        self.repo
            .get_signal(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Signal not found: {id}")))
    }
}
