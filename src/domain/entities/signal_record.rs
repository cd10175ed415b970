use crate::domain::indicators::signal::{CompositeSignal, IndicatorSnapshot, RsiZone, Trend};
use crate::domain::values::ticker::Ticker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A journaled evaluation of the composite signal for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRecord {
    pub id: String,
    pub ticker: Ticker,
    pub evaluated_at: DateTime<Utc>,
    pub close: f64,
    pub sma: f64,
    pub rsi: f64,
    pub trend: Option<Trend>,
    pub rsi_zone: RsiZone,
    pub signal: CompositeSignal,
    pub sma_window: usize,
    pub rsi_window: usize,
}

impl SignalRecord {
    /// Builds a record from a snapshot; `None` when the snapshot has no
    /// composite signal (series too short for one of the windows).
    pub fn from_snapshot(ticker: Ticker, snapshot: &IndicatorSnapshot) -> Option<Self> {
        Some(Self {
            id: uuid::Uuid::new_v4().to_string(),
            ticker,
            evaluated_at: Utc::now(),
            close: snapshot.close?,
            sma: snapshot.sma?,
            rsi: snapshot.rsi?,
            trend: snapshot.trend,
            rsi_zone: snapshot.rsi_zone?,
            signal: snapshot.signal?,
            sma_window: snapshot.sma_window,
            rsi_window: snapshot.rsi_window,
        })
    }
}
