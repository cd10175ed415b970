use crate::domain::entities::option_contract::OptionContract;
use crate::domain::error::DomainError;
use crate::domain::ports::options_flow::OptionsFlowProvider;
use crate::domain::values::option_kind::OptionKind;
use crate::domain::values::ticker::Ticker;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

pub struct OptionsFlowUseCase {
    provider: Arc<dyn OptionsFlowProvider>,
}

#[derive(Debug, Clone)]
pub struct FlowFilter {
    pub min_volume: u64,
    pub kind: Option<OptionKind>,
    pub limit: usize,
}

impl Default for FlowFilter {
    fn default() -> Self {
        Self {
            min_volume: 100,
            kind: None,
            limit: 25,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlowReport {
    pub underlying: Ticker,
    pub fetched_at: DateTime<Utc>,
    pub total_contracts: usize,
    pub matched: usize,
    pub contracts: Vec<FlowRow>,
}

#[derive(Debug, Serialize)]
pub struct FlowRow {
    #[serde(flatten)]
    pub contract: OptionContract,
    pub unusual: bool,
    pub notional: Option<f64>,
}

impl OptionsFlowUseCase {
    pub fn new(provider: Arc<dyn OptionsFlowProvider>) -> Self {
        Self { provider }
    }

    pub async fn execute(
        &self,
        underlying: &Ticker,
        filter: &FlowFilter,
    ) -> Result<FlowReport, DomainError> {
        tracing::info!(underlying = %underlying, provider = self.provider.name(), "fetching options flow");
        let contracts = self.provider.contracts(underlying).await?;
        let total_contracts = contracts.len();

        let mut kept: Vec<OptionContract> = contracts
            .into_iter()
            .filter(|c| c.volume >= filter.min_volume)
            .filter(|c| filter.kind.map_or(true, |k| c.kind == k))
            .collect();
        let matched = kept.len();

        kept.sort_by(|a, b| b.volume.cmp(&a.volume).then_with(|| a.symbol.cmp(&b.symbol)));
        kept.truncate(filter.limit);

        Ok(FlowReport {
            underlying: underlying.clone(),
            fetched_at: Utc::now(),
            total_contracts,
            matched,
            contracts: kept
                .into_iter()
                .map(|c| FlowRow {
                    unusual: c.is_unusual(),
                    notional: c.notional(),
                    contract: c,
                })
                .collect(),
        })
    }
}
