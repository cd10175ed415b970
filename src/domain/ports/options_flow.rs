use crate::domain::entities::option_contract::OptionContract;
use crate::domain::error::DomainError;
use crate::domain::values::ticker::Ticker;

/// Source of listed options contracts with their day activity.
#[async_trait::async_trait]
pub trait OptionsFlowProvider: Send + Sync {
    async fn contracts(&self, underlying: &Ticker) -> Result<Vec<OptionContract>, DomainError>;

    fn name(&self) -> &str;
}
