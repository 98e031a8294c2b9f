// Repository trait for persisting finished quotes
use crate::domain::quote::{CustomerInfo, Quote, QuoteItem};
use async_trait::async_trait;

pub type QuoteId = u64;

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Store a quote snapshot and return its id. Write-only from the session's side.
    async fn save_quote(
        &self,
        customer: &CustomerInfo,
        quote: &Quote,
        items: &[QuoteItem],
    ) -> anyhow::Result<QuoteId>;
}
