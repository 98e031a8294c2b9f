// In-memory quote store
use crate::application::quote_repository::{QuoteId, QuoteRepository};
use crate::domain::quote::{CustomerInfo, Quote, QuoteItem};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize)]
pub struct SavedQuote {
    pub id: QuoteId,
    pub customer: CustomerInfo,
    pub quote: Quote,
    pub items: Vec<QuoteItem>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreState {
    quotes: Vec<SavedQuote>,
    next_id: QuoteId,
}

#[derive(Debug, Default)]
pub struct InMemoryQuoteStore {
    state: RwLock<StoreState>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: QuoteId) -> Option<SavedQuote> {
        self.state
            .read()
            .await
            .quotes
            .iter()
            .find(|q| q.id == id)
            .cloned()
    }

    /// All saved quotes, newest first
    pub async fn list_quotes(&self) -> Vec<SavedQuote> {
        let mut quotes = self.state.read().await.quotes.clone();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        quotes
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteStore {
    async fn save_quote(
        &self,
        customer: &CustomerInfo,
        quote: &Quote,
        items: &[QuoteItem],
    ) -> Result<QuoteId> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;

        state.quotes.push(SavedQuote {
            id,
            customer: customer.clone(),
            quote: quote.clone(),
            items: items.to_vec(),
            created_at: Utc::now(),
        });

        tracing::debug!("Stored quote {} with {} items", id, items.len());
        Ok(id)
    }
}
