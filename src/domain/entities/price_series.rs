use crate::domain::values::ticker::Ticker;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One daily bar. `adj_close` is absent when the provider does not report
/// split/dividend-adjusted prices for the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

impl PriceBar {
    /// Adjusted close when known, raw close otherwise.
    pub fn effective_close(&self) -> f64 {
        self.adj_close.unwrap_or(self.close)
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    pub ticker: Ticker,
    pub currency: Option<String>,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: Ticker, currency: Option<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        Self {
            ticker,
            currency,
            bars,
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(PriceBar::effective_close).collect()
    }

    pub fn last_bar(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar(day: u32, close: f64, adj: Option<f64>) -> PriceBar {
        PriceBar {
            timestamp: Utc.with_ymd_and_hms(2026, 3, day, 14, 30, 0).unwrap(),
            open: None,
            high: None,
            low: None,
            close,
            adj_close: adj,
            volume: None,
        }
    }

    #[test]
    fn test_closes_fall_back_per_bar() {
        let series = PriceSeries::new(
            Ticker::new("AAPL").unwrap(),
            None,
            vec![bar(2, 10.0, Some(9.5)), bar(3, 11.0, None)],
        );
        assert_eq!(series.closes(), vec![9.5, 11.0]);
    }

    #[test]
    fn test_bars_sorted_on_construction() {
        let series = PriceSeries::new(
            Ticker::new("AAPL").unwrap(),
            None,
            vec![bar(5, 3.0, None), bar(2, 1.0, None), bar(4, 2.0, None)],
        );
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.last_bar().unwrap().date().to_string(), "2026-03-05");
    }
}
