//! Pure sizing, power, pricing and quote calculations.

pub mod catalog;
pub mod display;
pub mod error;
pub mod power;
pub mod pricing;
pub mod quote;
pub mod units;

pub use catalog::{
    PowerEquipmentSpec, ProcessorSpec, Product, ProductCategory, ProductFilter, ProductId,
    ProductSpec, ReceivingCardType, TileSpec,
};
pub use display::{calculate_display, DisplayRequest, DisplayResult, ProcessorTier};
pub use error::{QuoteError, QuoteResult};
pub use power::{plan_power, Phase, PowerInputs, PowerPlan};
pub use pricing::{resolve_sell_price, PricingMethod, PricingPolicy};
pub use quote::{CustomerInfo, ItemId, Quote, QuoteItem, QuoteItemInput, QuoteLedger};
pub use units::{meters_to_feet_inches, to_meters, watts_to_btu_per_hour, Axis, LengthUnit};
