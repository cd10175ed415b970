//! Trend direction, RSI zone and the composite price/SMA/RSI signal.

use super::rsi::{rsi, Smoothing};
use super::sma::{bollinger, sma, Band};
use crate::domain::values::thresholds::RsiThresholds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Slope of the moving average between its last two defined values.
    pub fn from_sma(column: &[Option<f64>]) -> Option<Trend> {
        let mut defined = column.iter().rev().filter_map(|v| *v);
        let last = defined.next()?;
        let prev = defined.next()?;
        Some(if last > prev {
            Trend::Up
        } else if last < prev {
            Trend::Down
        } else {
            Trend::Flat
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    pub fn classify(rsi: f64, thresholds: &RsiThresholds) -> RsiZone {
        if rsi < thresholds.lower() {
            RsiZone::Oversold
        } else if rsi > thresholds.upper() {
            RsiZone::Overbought
        } else {
            RsiZone::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeSignal {
    Bullish,
    Bearish,
    Neutral,
}

impl CompositeSignal {
    /// Price above its average with room below the overbought band reads
    /// bullish; the mirror image reads bearish.
    pub fn evaluate(price: f64, sma: f64, rsi: f64, thresholds: &RsiThresholds) -> Self {
        if price > sma && rsi < thresholds.upper() {
            CompositeSignal::Bullish
        } else if price < sma && rsi > thresholds.lower() {
            CompositeSignal::Bearish
        } else {
            CompositeSignal::Neutral
        }
    }
}

impl fmt::Display for CompositeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeSignal::Bullish => write!(f, "bullish"),
            CompositeSignal::Bearish => write!(f, "bearish"),
            CompositeSignal::Neutral => write!(f, "neutral"),
        }
    }
}

impl std::str::FromStr for CompositeSignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bullish" => Ok(CompositeSignal::Bullish),
            "bearish" => Ok(CompositeSignal::Bearish),
            "neutral" => Ok(CompositeSignal::Neutral),
            _ => Err(format!("Unknown signal: {s}")),
        }
    }
}

/// Window sizes and bands used for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSettings {
    pub rsi_window: usize,
    pub sma_window: usize,
    /// Bollinger width in standard deviations; bands share `sma_window`.
    pub band_k: f64,
    pub smoothing: Smoothing,
    pub thresholds: RsiThresholds,
}

impl IndicatorSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.rsi_window == 0 {
            return Err("RSI window must be at least 1".into());
        }
        if self.sma_window == 0 {
            return Err("SMA window must be at least 1".into());
        }
        if !self.band_k.is_finite() || self.band_k < 0.0 {
            return Err(format!("Band width must be a non-negative number, got {}", self.band_k));
        }
        Ok(())
    }
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            rsi_window: 14,
            sma_window: 20,
            band_k: 2.0,
            smoothing: Smoothing::default(),
            thresholds: RsiThresholds::default(),
        }
    }
}

/// Per-bar indicator columns, aligned with the input closes.
#[derive(Debug, Clone)]
pub struct IndicatorColumns {
    pub closes: Vec<f64>,
    pub sma: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub bands: Vec<Option<Band>>,
}

impl IndicatorColumns {
    pub fn compute(closes: Vec<f64>, settings: &IndicatorSettings) -> Self {
        Self {
            sma: sma(&closes, settings.sma_window),
            rsi: rsi(&closes, settings.rsi_window, settings.smoothing),
            bands: bollinger(&closes, settings.sma_window, settings.band_k),
            closes,
        }
    }
}

/// Latest value of every indicator plus the derived classifications.
/// Fields stay `None` when the series is too short for their window.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSnapshot {
    pub as_of: Option<DateTime<Utc>>,
    pub close: Option<f64>,
    pub sma: Option<f64>,
    pub rsi: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
    pub trend: Option<Trend>,
    pub rsi_zone: Option<RsiZone>,
    pub signal: Option<CompositeSignal>,
    pub sma_window: usize,
    pub rsi_window: usize,
}

impl IndicatorSnapshot {
    pub fn from_columns(
        columns: &IndicatorColumns,
        as_of: Option<DateTime<Utc>>,
        settings: &IndicatorSettings,
    ) -> Self {
        let close = columns.closes.last().copied();
        let sma_now = columns.sma.last().copied().flatten();
        let rsi_now = columns.rsi.last().copied().flatten();
        let band = columns.bands.last().copied().flatten();

        let signal = match (close, sma_now, rsi_now) {
            (Some(p), Some(s), Some(r)) => {
                Some(CompositeSignal::evaluate(p, s, r, &settings.thresholds))
            }
            _ => None,
        };

        Self {
            as_of,
            close,
            sma: sma_now,
            rsi: rsi_now,
            upper_band: band.map(|b| b.upper),
            lower_band: band.map(|b| b.lower),
            trend: Trend::from_sma(&columns.sma),
            rsi_zone: rsi_now.map(|r| RsiZone::classify(r, &settings.thresholds)),
            signal,
            sma_window: settings.sma_window,
            rsi_window: settings.rsi_window,
        }
    }
}
