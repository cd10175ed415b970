// Relative Strength Index
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How average gain/loss is carried from one bar to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    /// Plain rolling mean of the last `window` deltas.
    #[default]
    Simple,
    /// Wilder's recursive smoothing seeded with a simple mean.
    Wilder,
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Smoothing::Simple => write!(f, "simple"),
            Smoothing::Wilder => write!(f, "wilder"),
        }
    }
}

impl FromStr for Smoothing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" | "sma" => Ok(Smoothing::Simple),
            "wilder" | "rma" => Ok(Smoothing::Wilder),
            _ => Err(format!("Unknown RSI smoothing: {s}")),
        }
    }
}

/// RSI over `window` price changes. Position `i` is defined once `window`
/// deltas ending at `i` exist, i.e. for `i >= window`.
pub fn rsi(values: &[f64], window: usize, smoothing: Smoothing) -> Vec<Option<f64>> {
    if window == 0 || values.len() <= window {
        return vec![None; values.len()];
    }

    let gains: Vec<f64> = values.windows(2).map(|w| (w[1] - w[0]).max(0.0)).collect();
    let losses: Vec<f64> = values.windows(2).map(|w| (w[0] - w[1]).max(0.0)).collect();
    let n = window as f64;

    let mut out = vec![None; window];
    match smoothing {
        Smoothing::Simple => {
            for end in window..values.len() {
                let avg_gain = gains[end - window..end].iter().sum::<f64>() / n;
                let avg_loss = losses[end - window..end].iter().sum::<f64>() / n;
                out.push(Some(rsi_value(avg_gain, avg_loss)));
            }
        }
        Smoothing::Wilder => {
            let mut avg_gain = gains[..window].iter().sum::<f64>() / n;
            let mut avg_loss = losses[..window].iter().sum::<f64>() / n;
            out.push(Some(rsi_value(avg_gain, avg_loss)));
            for i in window..gains.len() {
                avg_gain = (avg_gain * (n - 1.0) + gains[i]) / n;
                avg_loss = (avg_loss * (n - 1.0) + losses[i]) / n;
                out.push(Some(rsi_value(avg_gain, avg_loss)));
            }
        }
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // flat window reads as neutral, all-up window as 100
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}
