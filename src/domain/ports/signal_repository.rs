use crate::domain::entities::signal_record::SignalRecord;
use crate::domain::error::DomainError;
use crate::domain::values::ticker::Ticker;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct SignalFilter {
    pub ticker: Option<Ticker>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

pub trait SignalRepository: Send + Sync {
    fn add_signal(&self, record: &SignalRecord) -> Result<(), DomainError>;
    fn list_signals(&self, filter: &SignalFilter) -> Result<Vec<SignalRecord>, DomainError>;
    fn get_signal(&self, id: &str) -> Result<Option<SignalRecord>, DomainError>;
}
