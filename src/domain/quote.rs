// Quote ledger: ordered line items and aggregate totals
use serde::{Deserialize, Serialize};

use super::catalog::{ProductCategory, ProductId};
use super::error::{require_finite, require_non_negative, QuoteError, QuoteResult};
use super::pricing::{resolve_sell_price, PricingMethod, PricingPolicy};

pub type ItemId = u64;

pub const DEFAULT_QUOTE_MARKUP_PERCENT: f64 = 25.0;

/// A line item as requested by the caller, before pricing and id assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteItemInput {
    pub product_id: Option<ProductId>,
    pub name: String,
    pub category: ProductCategory,
    pub manufacturer: Option<String>,
    pub quantity: i64,
    pub unit_cost: Option<f64>,
    pub buy_price: Option<f64>,
    pub unit_price: Option<f64>,
    pub pricing: Option<PricingMethod>,
}

impl QuoteItemInput {
    pub fn new(name: impl Into<String>, category: ProductCategory, quantity: i64) -> Self {
        Self {
            product_id: None,
            name: name.into(),
            category,
            manufacturer: None,
            quantity,
            unit_cost: None,
            buy_price: None,
            unit_price: None,
            pricing: None,
        }
    }

    pub fn unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn unit_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = Some(unit_cost);
        self
    }

    pub fn buy_price(mut self, buy_price: f64) -> Self {
        self.buy_price = Some(buy_price);
        self
    }

    pub fn priced_by(mut self, method: PricingMethod) -> Self {
        self.pricing = Some(method);
        self
    }

    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Resolves the effective unit sell price: the pricing method when one is
    /// given, else `unit_price`, else `unit_cost`.
    fn resolve_sell_price(&self, policy: &PricingPolicy) -> QuoteResult<f64> {
        match &self.pricing {
            Some(method @ PricingMethod::Manual { .. }) => {
                resolve_sell_price(self.unit_cost.unwrap_or(0.0), method, policy)
            }
            Some(method) => {
                let cost = self.unit_cost.ok_or_else(|| {
                    QuoteError::invalid(format!("'{}' needs a unit cost to apply a markup", self.name))
                })?;
                resolve_sell_price(cost, method, policy)
            }
            None => {
                let price = self.unit_price.or(self.unit_cost).ok_or_else(|| {
                    QuoteError::invalid(format!("'{}' has neither a unit price nor a unit cost", self.name))
                })?;
                require_non_negative("unit price", price)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub id: ItemId,
    pub product_id: Option<ProductId>,
    pub name: String,
    pub category: ProductCategory,
    pub manufacturer: Option<String>,
    pub quantity: u32,
    pub unit_cost: Option<f64>,
    pub buy_price: Option<f64>,
    /// Effective unit sell price after pricing resolution.
    pub sell_price: f64,
    pub total_price: f64,
}

impl QuoteItem {
    /// Display alias of the sell price.
    pub fn unit_price(&self) -> f64 {
        self.sell_price
    }

    /// Wholesale unit basis: buy price, then unit cost, then the sell price.
    pub fn buy_basis(&self) -> f64 {
        self.buy_price.or(self.unit_cost).unwrap_or(self.sell_price)
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = self.unit_price() * quantity as f64;
    }
}

/// Derived totals for the current ledger contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal: f64,
    pub markup_percentage: f64,
    pub markup_amount: f64,
    pub fees: f64,
    pub total: f64,
    pub buy_total: f64,
    pub sell_total: f64,
    pub profit_margin: f64,
    pub profit_percentage: f64,
    pub item_count: usize,
    pub total_quantity: u64,
}

/// Customer and commercial terms attached to a saved quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub project_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_markup_percentage")]
    pub markup_percentage: f64,
    #[serde(default)]
    pub fees: f64,
}

fn default_markup_percentage() -> f64 {
    DEFAULT_QUOTE_MARKUP_PERCENT
}

impl CustomerInfo {
    pub fn new(customer_name: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_email: None,
            project_name: project_name.into(),
            description: None,
            markup_percentage: DEFAULT_QUOTE_MARKUP_PERCENT,
            fees: 0.0,
        }
    }

    pub fn validate(&self) -> QuoteResult<()> {
        if self.customer_name.trim().is_empty() {
            return Err(QuoteError::invalid("customer name is required"));
        }
        if self.project_name.trim().is_empty() {
            return Err(QuoteError::invalid("project name is required"));
        }
        require_finite("markup percentage", self.markup_percentage)?;
        require_non_negative("fees", self.fees)?;
        Ok(())
    }
}

/// Line items of one quote-building session. Ids are assigned on append and
/// never reused, even after removal. Identical products are not merged.
#[derive(Debug, Clone)]
pub struct QuoteLedger {
    items: Vec<QuoteItem>,
    next_id: ItemId,
}

impl Default for QuoteLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteLedger {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&QuoteItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, input: QuoteItemInput, policy: &PricingPolicy) -> QuoteResult<ItemId> {
        let quantity = validate_quantity(input.quantity)?;
        let sell_price = input.resolve_sell_price(policy)?;
        if let Some(cost) = input.unit_cost {
            require_non_negative("unit cost", cost)?;
        }
        if let Some(buy) = input.buy_price {
            require_non_negative("buy price", buy)?;
        }

        let id = self.next_id;
        self.next_id += 1;

        self.items.push(QuoteItem {
            id,
            product_id: input.product_id,
            name: input.name,
            category: input.category,
            manufacturer: input.manufacturer,
            quantity,
            unit_cost: input.unit_cost,
            buy_price: input.buy_price,
            sell_price,
            total_price: sell_price * quantity as f64,
        });

        Ok(id)
    }

    /// Removes the item if present. Missing ids are a no-op; returns whether
    /// anything was removed.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn update_quantity(&mut self, id: ItemId, quantity: i64) -> QuoteResult<()> {
        let quantity = validate_quantity(quantity)?;
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(QuoteError::NotFound(id))?;
        item.set_quantity(quantity);
        Ok(())
    }

    pub fn compute_totals(&self, markup_percentage: f64, fees: f64) -> Quote {
        let subtotal: f64 = self.items.iter().map(|item| item.total_price).sum();
        let buy_total: f64 = self
            .items
            .iter()
            .map(|item| item.buy_basis() * item.quantity as f64)
            .sum();
        let sell_total: f64 = self
            .items
            .iter()
            .map(|item| item.sell_price * item.quantity as f64)
            .sum();

        let markup_amount = subtotal * markup_percentage / 100.0;
        let profit_margin = sell_total - buy_total;
        let profit_percentage = if buy_total > 0.0 {
            profit_margin / buy_total * 100.0
        } else {
            0.0
        };

        Quote {
            subtotal,
            markup_percentage,
            markup_amount,
            fees,
            total: subtotal + markup_amount + fees,
            buy_total,
            sell_total,
            profit_margin,
            profit_percentage,
            item_count: self.items.len(),
            total_quantity: self.items.iter().map(|item| item.quantity as u64).sum(),
        }
    }

    pub fn totals_for(&self, customer: &CustomerInfo) -> Quote {
        self.compute_totals(customer.markup_percentage, customer.fees)
    }
}

fn validate_quantity(quantity: i64) -> QuoteResult<u32> {
    u32::try_from(quantity)
        .map_err(|_| QuoteError::invalid(format!("quantity must be a whole number >= 0, got {quantity}")))
}
