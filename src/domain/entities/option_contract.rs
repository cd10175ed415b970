use crate::domain::values::option_kind::OptionKind;
use chrono::NaiveDate;
use serde::Serialize;

/// A single listed options contract as reported by the flow provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionContract {
    pub symbol: String,
    pub underlying: String,
    pub kind: OptionKind,
    pub strike: f64,
    pub expiry: NaiveDate,
    pub ask: Option<f64>,
    pub volume: u64,
    pub open_interest: Option<u64>,
}

impl OptionContract {
    /// Day volume above open interest suggests new positioning rather than
    /// turnover of existing contracts.
    pub fn is_unusual(&self) -> bool {
        matches!(self.open_interest, Some(oi) if oi > 0 && self.volume > oi)
    }

    /// Ask times volume times the 100-share multiplier, when the ask is known.
    pub fn notional(&self) -> Option<f64> {
        self.ask.map(|ask| ask * self.volume as f64 * 100.0)
    }
}
