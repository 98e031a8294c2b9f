// Quote session service - Use case for building one quote against the catalog
use crate::application::catalog_repository::CatalogRepository;
use crate::application::quote_repository::{QuoteId, QuoteRepository};
use crate::domain::catalog::{Product, ProductCategory, ProductFilter, ProductId};
use crate::domain::display::{DisplayRequest, DisplayResult};
use crate::domain::error::QuoteError;
use crate::domain::power::{plan_power, PowerInputs, PowerPlan};
use crate::domain::pricing::PricingPolicy;
use crate::domain::quote::{CustomerInfo, ItemId, Quote, QuoteItem, QuoteItemInput, QuoteLedger};
use crate::domain::units::LengthUnit;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error("product {0} not found in catalog")]
    ProductNotFound(ProductId),
    #[error("product {0} is not an LED tile")]
    NotALedTile(ProductId),
    #[error("catalog lookup failed")]
    Catalog(#[source] anyhow::Error),
    #[error("failed to save quote")]
    Persistence(#[source] anyhow::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// A display sized against a catalog tile, ready to be added to the quote.
#[derive(Debug, Clone)]
pub struct SizedDisplay {
    pub product: Product,
    pub request: DisplayRequest,
    pub result: DisplayResult,
    /// Unit sell price used for the cost estimate and the line item.
    pub unit_price: f64,
}

pub struct QuoteSessionService {
    catalog: Arc<dyn CatalogRepository>,
    quotes: Arc<dyn QuoteRepository>,
    pricing: PricingPolicy,
    safety_factor: f64,
    // Single writer per session: every mutation goes through this lock.
    ledger: Mutex<QuoteLedger>,
}

impl QuoteSessionService {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        quotes: Arc<dyn QuoteRepository>,
        pricing: PricingPolicy,
        safety_factor: f64,
    ) -> Self {
        Self {
            catalog,
            quotes,
            pricing,
            safety_factor,
            ledger: Mutex::new(QuoteLedger::new()),
        }
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    pub async fn find_products(&self, filter: &ProductFilter) -> SessionResult<Vec<Product>> {
        self.catalog
            .find_products(filter)
            .await
            .map_err(SessionError::Catalog)
    }

    pub async fn available_tiles(&self) -> SessionResult<Vec<Product>> {
        let tiles = self
            .find_products(&ProductFilter::category(ProductCategory::LedTile))
            .await?;
        tracing::debug!("{} LED tiles available in catalog", tiles.len());
        Ok(tiles)
    }

    async fn product(&self, id: ProductId) -> SessionResult<Product> {
        self.catalog
            .find_product_by_id(id)
            .await
            .map_err(SessionError::Catalog)?
            .ok_or(SessionError::ProductNotFound(id))
    }

    /// Size a display of the given dimensions using catalog tile `product_id`.
    pub async fn size_display(
        &self,
        product_id: ProductId,
        width: f64,
        height: f64,
        unit: LengthUnit,
    ) -> SessionResult<SizedDisplay> {
        let product = self.product(product_id).await?;
        let tile = product
            .tile_spec()
            .cloned()
            .ok_or(SessionError::NotALedTile(product_id))?;

        let unit_price = product.effective_unit_price(&self.pricing)?;
        let request = DisplayRequest::new(width, height, unit, tile);
        let result = request.calculate(Some(unit_price))?;

        tracing::info!(
            "Sized {}x{} {} display with {}: {}x{} tiles ({} total), {}",
            width,
            height,
            unit,
            product.name,
            result.tiles_x,
            result.tiles_y,
            result.total_tiles,
            result.recommended_processor.label()
        );
        if result.is_empty() {
            tracing::warn!("Requested size is smaller than one {} tile", product.name);
        }

        Ok(SizedDisplay {
            product,
            request,
            result,
            unit_price,
        })
    }

    /// Add a sized display as one line item, quantity = total tiles.
    pub async fn add_display(
        &self,
        sized: &SizedDisplay,
        nickname: Option<&str>,
    ) -> SessionResult<ItemId> {
        if sized.result.is_empty() {
            return Err(QuoteError::invalid(
                "display has no tiles; enlarge the requested dimensions",
            )
            .into());
        }

        let product = &sized.product;
        let nickname = nickname
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or(sized.request.nickname.as_deref());
        let name = match nickname {
            Some(nickname) => format!("{} ({})", product.name, nickname),
            None => product.name.clone(),
        };

        let input = QuoteItemInput {
            product_id: Some(product.id),
            name,
            category: product.category(),
            manufacturer: product.manufacturer.clone(),
            quantity: sized.result.total_tiles as i64,
            unit_cost: Some(product.unit_cost),
            buy_price: product.buy_basis(),
            unit_price: Some(sized.unit_price),
            pricing: None,
        };

        let id = self.ledger.lock().await.add_item(input, &self.pricing)?;
        tracing::info!("Added display item {} ({} tiles)", id, sized.result.total_tiles);
        Ok(id)
    }

    /// Add `quantity` of a catalog product, priced by the product's own method.
    pub async fn add_product(&self, product_id: ProductId, quantity: i64) -> SessionResult<ItemId> {
        let product = self.product(product_id).await?;

        let input = QuoteItemInput {
            product_id: Some(product.id),
            name: product.name.clone(),
            category: product.category(),
            manufacturer: product.manufacturer.clone(),
            quantity,
            unit_cost: Some(product.unit_cost),
            buy_price: product.buy_basis(),
            unit_price: product
                .unit_price
                .or_else(|| product.tile_spec().map(|tile| tile.sell_price)),
            pricing: product.pricing.clone(),
        };

        let id = self.ledger.lock().await.add_item(input, &self.pricing)?;
        tracing::info!("Added {} x {} as item {}", quantity, product.name, id);
        Ok(id)
    }

    pub async fn remove_item(&self, id: ItemId) -> bool {
        let removed = self.ledger.lock().await.remove_item(id);
        if removed {
            tracing::info!("Removed item {}", id);
        } else {
            tracing::debug!("Remove of unknown item {} ignored", id);
        }
        removed
    }

    pub async fn update_quantity(&self, id: ItemId, quantity: i64) -> SessionResult<()> {
        self.ledger.lock().await.update_quantity(id, quantity)?;
        tracing::debug!("Item {} quantity set to {}", id, quantity);
        Ok(())
    }

    pub async fn items(&self) -> Vec<QuoteItem> {
        self.ledger.lock().await.items().to_vec()
    }

    /// Power inputs seeded with a display's maximum draw and the session's
    /// safety factor.
    pub fn power_inputs_for(&self, display: &DisplayResult) -> PowerInputs {
        PowerInputs {
            display_w: display.total_power_max_w,
            safety_factor: self.safety_factor,
            ..PowerInputs::default()
        }
    }

    pub fn plan_power(&self, inputs: &PowerInputs) -> SessionResult<PowerPlan> {
        let plan = plan_power(inputs)?;
        tracing::info!(
            "Power plan: {:.0} W load -> {:.0} W {} supply{}",
            plan.total_power_w,
            plan.recommended_capacity_w,
            plan.recommended_phase.label(),
            if plan.redundant { " (redundant)" } else { "" }
        );
        Ok(plan)
    }

    pub async fn totals(&self, markup_percentage: f64, fees: f64) -> Quote {
        self.ledger.lock().await.compute_totals(markup_percentage, fees)
    }

    /// Validate customer details and hand the current quote to the store.
    pub async fn save_quote(&self, customer: &CustomerInfo) -> SessionResult<QuoteId> {
        customer.validate()?;

        let (quote, items) = {
            let ledger = self.ledger.lock().await;
            if ledger.is_empty() {
                return Err(QuoteError::invalid("cannot save a quote with no items").into());
            }
            (ledger.totals_for(customer), ledger.items().to_vec())
        };

        let id = self
            .quotes
            .save_quote(customer, &quote, &items)
            .await
            .map_err(SessionError::Persistence)?;

        tracing::info!(
            "Saved quote {} for {} / {}: {} items, total {:.2}",
            id,
            customer.customer_name,
            customer.project_name,
            items.len(),
            quote.total
        );
        Ok(id)
    }
}
