use crate::domain::error::DomainError;
use crate::infrastructure::market_data::yahoo;
use crate::infrastructure::options::polygon;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings, read from `DELTA_GHOST_*` environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: String,
    pub yahoo_url: String,
    pub options_url: String,
    pub options_api_key: Option<String>,
    pub http_timeout: Duration,
    pub rsi_window: usize,
    pub sma_window: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: "./delta-ghost.db".into(),
            yahoo_url: yahoo::DEFAULT_BASE_URL.into(),
            options_url: polygon::DEFAULT_BASE_URL.into(),
            options_api_key: None,
            http_timeout: Duration::from_secs(15),
            rsi_window: 14,
            sma_window: 20,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            db_path: get("DELTA_GHOST_DB").unwrap_or(defaults.db_path),
            yahoo_url: get("DELTA_GHOST_YAHOO_URL").unwrap_or(defaults.yahoo_url),
            options_url: get("DELTA_GHOST_OPTIONS_URL").unwrap_or(defaults.options_url),
            options_api_key: get("DELTA_GHOST_OPTIONS_API_KEY"),
            http_timeout: Duration::from_secs(parse_or(
                "DELTA_GHOST_HTTP_TIMEOUT_SECS",
                get("DELTA_GHOST_HTTP_TIMEOUT_SECS"),
                defaults.http_timeout.as_secs(),
            )?),
            rsi_window: positive(
                "DELTA_GHOST_RSI_WINDOW",
                parse_or("DELTA_GHOST_RSI_WINDOW", get("DELTA_GHOST_RSI_WINDOW"), defaults.rsi_window)?,
            )?,
            sma_window: positive(
                "DELTA_GHOST_SMA_WINDOW",
                parse_or("DELTA_GHOST_SMA_WINDOW", get("DELTA_GHOST_SMA_WINDOW"), defaults.sma_window)?,
            )?,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, DomainError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| DomainError::Config(format!("{key} must be a non-negative integer, got '{v}'"))),
    }
}

fn positive(key: &str, value: usize) -> Result<usize, DomainError> {
    if value == 0 {
        return Err(DomainError::Config(format!("{key} must be at least 1")));
    }
    Ok(value)
}
