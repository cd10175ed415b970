use crate::application::analyze::AnalyzeOptions;
use crate::config::Settings;
use crate::domain::indicators::signal::IndicatorSettings;
use crate::domain::values::thresholds::RsiThresholds;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "delta-ghost", about = "Price history, RSI/SMA signals and options flow")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Indicator flags shared by `analyze` and `scan`. Unset windows fall back
/// to the configured defaults.
#[derive(Args, Debug, Clone)]
pub struct IndicatorArgs {
    /// History range (1mo, 3mo, 6mo, 1y, 2y, 5y, ytd, max)
    #[arg(long, default_value = "6mo")]
    pub range: String,
    #[arg(long)]
    pub rsi_window: Option<usize>,
    #[arg(long)]
    pub sma_window: Option<usize>,
    /// Bollinger band width in standard deviations
    #[arg(long, default_value = "2.0")]
    pub band_k: f64,
    /// RSI smoothing (simple, wilder)
    #[arg(long, default_value = "simple")]
    pub smoothing: String,
    /// Oversold threshold
    #[arg(long, default_value = "30")]
    pub lower: f64,
    /// Overbought threshold
    #[arg(long, default_value = "70")]
    pub upper: f64,
    /// Store the resulting signal in the journal
    #[arg(long)]
    pub record: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Close-price history for one or more tickers
    Chart {
        /// Comma-separated tickers, e.g. "AAPL, TSLA"
        tickers: String,
        #[arg(long, default_value = "6mo")]
        range: String,
    },
    /// RSI, SMA, Bollinger bands and composite signal for one ticker
    Analyze {
        ticker: String,
        #[command(flatten)]
        indicators: IndicatorArgs,
        /// Include the per-bar indicator table
        #[arg(long)]
        full: bool,
    },
    /// Composite signal for several tickers
    Scan {
        /// Comma-separated tickers
        tickers: String,
        #[command(flatten)]
        indicators: IndicatorArgs,
    },
    /// Options contracts with the most volume for an underlying
    Options {
        ticker: String,
        #[arg(long, default_value = "100")]
        min_volume: u64,
        /// Contract kind (call, put)
        #[arg(long)]
        kind: Option<String>,
        #[arg(long, default_value = "25")]
        limit: usize,
    },
    /// List journaled signals
    History {
        #[arg(long)]
        ticker: Option<String>,
        /// Only signals on or after this date (YYYY-MM-DD or RFC3339)
        #[arg(long)]
        since: Option<String>,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show one journaled signal
    Signal {
        id: String,
    },
}

impl IndicatorArgs {
    pub fn to_options(
        &self,
        settings: &Settings,
        include_rows: bool,
    ) -> Result<AnalyzeOptions, String> {
        let indicator_settings = IndicatorSettings {
            rsi_window: self.rsi_window.unwrap_or(settings.rsi_window),
            sma_window: self.sma_window.unwrap_or(settings.sma_window),
            band_k: self.band_k,
            smoothing: self.smoothing.parse()?,
            thresholds: RsiThresholds::new(self.lower, self.upper)?,
        };
        indicator_settings.validate()?;

        Ok(AnalyzeOptions {
            range: self.range.parse()?,
            settings: indicator_settings,
            record: self.record,
            include_rows,
        })
    }
}

pub fn parse_date(s: &Option<String>) -> Result<Option<DateTime<Utc>>, String> {
    match s {
        None => Ok(None),
        Some(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Ok(Some(dt.with_timezone(&Utc)));
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Ok(Some(date.and_time(NaiveTime::MIN).and_utc()));
            }
            Err(format!("Invalid date format: {s}. Use YYYY-MM-DD or RFC3339"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicators::rsi::Smoothing;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("delta-ghost").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_analyze_flags_override_settings() {
        let cli = parse(&["analyze", "aapl", "--sma-window", "50", "--smoothing", "wilder", "--record"]);
        let Commands::Analyze { indicators, full, .. } = cli.command else {
            panic!("expected analyze");
        };
        let opts = indicators.to_options(&Settings::default(), full).unwrap();
        assert_eq!(opts.settings.sma_window, 50);
        assert_eq!(opts.settings.rsi_window, 14);
        assert_eq!(opts.settings.smoothing, Smoothing::Wilder);
        assert!(opts.record);
        assert!(!opts.include_rows);
        assert_eq!(opts.range.as_str(), "6mo");
    }

    #[test]
    fn test_bad_thresholds_rejected() {
        let cli = parse(&["scan", "AAPL,TSLA", "--lower", "80", "--upper", "20"]);
        let Commands::Scan { indicators, .. } = cli.command else {
            panic!("expected scan");
        };
        assert!(indicators.to_options(&Settings::default(), false).is_err());
    }

    #[test]
    fn test_zero_window_rejected() {
        let cli = parse(&["analyze", "AAPL", "--rsi-window", "0"]);
        let Commands::Analyze { indicators, .. } = cli.command else {
            panic!("expected analyze");
        };
        assert!(indicators.to_options(&Settings::default(), false).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(&None).unwrap(), None);
        let day = parse_date(&Some("2026-03-02".into())).unwrap().unwrap();
        assert_eq!(day.to_rfc3339(), "2026-03-02T00:00:00+00:00");
        assert!(parse_date(&Some("2026-03-02T10:00:00Z".into())).unwrap().is_some());
        assert!(parse_date(&Some("03/02/2026".into())).is_err());
    }
}
