use crate::domain::entities::option_contract::OptionContract;
use crate::domain::error::DomainError;
use crate::domain::ports::options_flow::OptionsFlowProvider;
use crate::domain::values::option_kind::OptionKind;
use crate::domain::values::ticker::Ticker;
use crate::infrastructure::http::build_client;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// Snapshot pages fetched per request before giving up on `next_url`.
const MAX_PAGES: usize = 5;
const PAGE_SIZE: &str = "250";

/// Options chain snapshot from Polygon (`/v3/snapshot/options/{underlying}`).
pub struct PolygonOptionsFlow {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl PolygonOptionsFlow {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: build_client("DeltaGhost/0.1", timeout),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct SnapshotPage {
    #[serde(default)]
    results: Vec<SnapshotResult>,
    #[serde(default)]
    next_url: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct SnapshotResult {
    details: Option<ContractDetails>,
    #[serde(default)]
    day: Option<DayStats>,
    #[serde(default)]
    last_quote: Option<LastQuote>,
    #[serde(default)]
    open_interest: Option<f64>,
    #[serde(default)]
    underlying_asset: Option<UnderlyingAsset>,
}

#[derive(Debug, serde::Deserialize)]
struct ContractDetails {
    ticker: String,
    contract_type: String,
    expiration_date: String,
    strike_price: f64,
}

#[derive(Debug, serde::Deserialize)]
struct DayStats {
    #[serde(default)]
    volume: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct LastQuote {
    #[serde(default)]
    ask: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct UnderlyingAsset {
    #[serde(default)]
    ticker: Option<String>,
}

/// Converts one snapshot page; results missing contract details or carrying
/// unknown types/dates are skipped.
pub(crate) fn parse_page(underlying: &Ticker, body: &str) -> Result<SnapshotPage, DomainError> {
    let page: SnapshotPage = serde_json::from_str(body)
        .map_err(|e| DomainError::Parse(format!("Options snapshot JSON: {e}")))?;
    if page.status.as_deref() == Some("ERROR") {
        return Err(DomainError::Parse(format!(
            "Polygon error for {underlying}: {}",
            page.error.as_deref().unwrap_or("unknown")
        )));
    }
    Ok(page)
}

impl SnapshotPage {
    pub(crate) fn into_contracts(self, underlying: &Ticker) -> Vec<OptionContract> {
        self.results
            .into_iter()
            .filter_map(|r| {
                let details = r.details?;
                let kind: OptionKind = details.contract_type.parse().ok()?;
                let expiry = NaiveDate::parse_from_str(&details.expiration_date, "%Y-%m-%d").ok()?;
                Some(OptionContract {
                    symbol: details.ticker,
                    underlying: r
                        .underlying_asset
                        .and_then(|u| u.ticker)
                        .unwrap_or_else(|| underlying.to_string()),
                    kind,
                    strike: details.strike_price,
                    expiry,
                    ask: r.last_quote.and_then(|q| q.ask),
                    volume: r.day.and_then(|d| d.volume).map(to_count).unwrap_or(0),
                    open_interest: r.open_interest.map(to_count),
                })
            })
            .collect()
    }
}

fn to_count(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.round() as u64
    } else {
        0
    }
}

#[async_trait]
impl OptionsFlowProvider for PolygonOptionsFlow {
    async fn contracts(&self, underlying: &Ticker) -> Result<Vec<OptionContract>, DomainError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::Config("DELTA_GHOST_OPTIONS_API_KEY is not set".into())
        })?;

        let mut contracts = Vec::new();
        let mut request = self
            .client
            .get(format!("{}/v3/snapshot/options/{}", self.base_url, underlying))
            .query(&[("limit", PAGE_SIZE)]);

        for page_no in 1..=MAX_PAGES {
            let resp = request
                .bearer_auth(api_key)
                .send()
                .await
                .map_err(|e| DomainError::Network(e.to_string()))?;

            let status = resp.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(DomainError::NotFound(format!("No options chain for {underlying}")));
            }
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(DomainError::Network(format!(
                    "Polygon API {status} for {underlying}: {body}"
                )));
            }

            let body = resp
                .text()
                .await
                .map_err(|e| DomainError::Network(e.to_string()))?;
            let page = parse_page(underlying, &body)?;
            let next = page.next_url.clone();
            contracts.extend(page.into_contracts(underlying));

            match next {
                Some(url) if page_no < MAX_PAGES => {
                    tracing::debug!(page = page_no, "following options next_url");
                    request = self.client.get(url);
                }
                Some(_) => {
                    tracing::warn!(
                        underlying = %underlying,
                        fetched = contracts.len(),
                        "options chain truncated after {MAX_PAGES} pages"
                    );
                    break;
                }
                None => break,
            }
        }

        Ok(contracts)
    }

    fn name(&self) -> &str {
        "polygon"
    }
}
