// Catalog domain model: products as a tagged union over category
use std::fmt;

use serde::{Deserialize, Serialize};

use super::power::Phase;
use super::pricing::{resolve_sell_price, PricingMethod, PricingPolicy};
use super::error::QuoteResult;

pub type ProductId = i32;

/// Control-protocol family a tile's receiving card speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceivingCardType {
    NovaStar,
    Colorlight,
    Linsn,
    Brompton,
    Other,
}

/// Physical, electrical and commercial data for one LED tile model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    pub pixel_pitch_mm: f64,
    pub physical_width_mm: f64,
    pub physical_height_mm: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub weight_kg: f64,
    pub max_power_w: f64,
    pub avg_power_w: f64,
    pub brightness_nits: f64,
    pub refresh_rate_hz: f64,
    pub receiving_card_type: ReceivingCardType,
    #[serde(default)]
    pub scan_rate: Option<u32>,
    pub buy_price: f64,
    pub sell_price: f64,
}

impl TileSpec {
    pub fn tile_width_m(&self) -> f64 {
        self.physical_width_mm / 1000.0
    }

    pub fn tile_height_m(&self) -> f64 {
        self.physical_height_mm / 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorSpec {
    pub inputs: u32,
    pub outputs: u32,
    pub max_res_w: u32,
    pub max_res_h: u32,
    #[serde(default)]
    pub scaling: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerEquipmentSpec {
    pub capacity_w: f64,
    pub phase: Phase,
}

/// Category-specific data. Only the variant matching the category carries
/// extra fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ProductSpec {
    LedTile(TileSpec),
    LedProcessor(ProcessorSpec),
    PowerEquipment(PowerEquipmentSpec),
    Computing,
    Lighting,
    Audio,
    Camera,
    Networking,
    Cable,
    Hardware,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    LedTile,
    LedProcessor,
    PowerEquipment,
    Computing,
    Lighting,
    Audio,
    Camera,
    Networking,
    Cable,
    Hardware,
}

impl ProductCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LedTile => "LED Tile",
            Self::LedProcessor => "LED Processor",
            Self::PowerEquipment => "Power Equipment",
            Self::Computing => "Computing",
            Self::Lighting => "Lighting",
            Self::Audio => "Audio",
            Self::Camera => "Camera",
            Self::Networking => "Networking",
            Self::Cable => "Cable",
            Self::Hardware => "Hardware",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ProductSpec {
    pub fn category(&self) -> ProductCategory {
        match self {
            Self::LedTile(_) => ProductCategory::LedTile,
            Self::LedProcessor(_) => ProductCategory::LedProcessor,
            Self::PowerEquipment(_) => ProductCategory::PowerEquipment,
            Self::Computing => ProductCategory::Computing,
            Self::Lighting => ProductCategory::Lighting,
            Self::Audio => ProductCategory::Audio,
            Self::Camera => ProductCategory::Camera,
            Self::Networking => ProductCategory::Networking,
            Self::Cable => ProductCategory::Cable,
            Self::Hardware => ProductCategory::Hardware,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model_number: Option<String>,
    pub unit_cost: f64,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub pricing: Option<PricingMethod>,
    pub spec: ProductSpec,
}

impl Product {
    pub fn category(&self) -> ProductCategory {
        self.spec.category()
    }

    pub fn tile_spec(&self) -> Option<&TileSpec> {
        match &self.spec {
            ProductSpec::LedTile(tile) => Some(tile),
            _ => None,
        }
    }

    /// Unit sell price for this product.
    /// Priority: pricing method > unit_price > tile sell price > unit_cost
    pub fn effective_unit_price(&self, policy: &PricingPolicy) -> QuoteResult<f64> {
        if let Some(method) = &self.pricing {
            return resolve_sell_price(self.unit_cost, method, policy);
        }
        Ok(self
            .unit_price
            .or_else(|| self.tile_spec().map(|tile| tile.sell_price))
            .unwrap_or(self.unit_cost))
    }

    /// Wholesale basis for profit tracking: unit cost, or the tile's buy
    /// price when no cost is recorded.
    pub fn buy_basis(&self) -> Option<f64> {
        if self.unit_cost > 0.0 {
            return Some(self.unit_cost);
        }
        self.tile_spec().map(|tile| tile.buy_price)
    }
}

/// Catalog query filter. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<ProductCategory>,
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn category(category: ProductCategory) -> Self {
        Self {
            category: Some(category),
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category() != category {
                return false;
            }
        }
        if let Some(ref term) = self.search {
            let term = term.trim().to_lowercase();
            if term.is_empty() {
                return true;
            }
            let hit = |field: Option<&str>| {
                field.map(|f| f.to_lowercase().contains(&term)).unwrap_or(false)
            };
            if !hit(Some(&product.name))
                && !hit(product.manufacturer.as_deref())
                && !hit(product.model_number.as_deref())
            {
                return false;
            }
        }

        true
    }
}
