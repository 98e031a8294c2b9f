use serde::Deserialize;

use crate::domain::power::DEFAULT_SAFETY_FACTOR;
use crate::domain::pricing::{
    PricingPolicy, DEFAULT_BESPOKE_MARKUP_PERCENT, DEFAULT_GLOBAL_MARKUP_PERCENT,
};
use crate::domain::quote::DEFAULT_QUOTE_MARKUP_PERCENT;

const CONFIG_FILE: &str = "config/quoter";
const ENV_PREFIX: &str = "QUOTER";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct QuoterConfig {
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub power: PowerSettings,
    #[serde(default)]
    pub quote: QuoteSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PricingSettings {
    pub global_markup_percent: f64,
    pub default_bespoke_markup_percent: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            global_markup_percent: DEFAULT_GLOBAL_MARKUP_PERCENT,
            default_bespoke_markup_percent: DEFAULT_BESPOKE_MARKUP_PERCENT,
        }
    }
}

impl PricingSettings {
    pub fn policy(&self) -> PricingPolicy {
        PricingPolicy {
            global_markup_percent: self.global_markup_percent,
            default_bespoke_markup_percent: self.default_bespoke_markup_percent,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PowerSettings {
    pub safety_factor: f64,
}

impl Default for PowerSettings {
    fn default() -> Self {
        Self {
            safety_factor: DEFAULT_SAFETY_FACTOR,
        }
    }
}

/// Commercial terms applied when no customer-specific values are given.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct QuoteSettings {
    pub markup_percentage: f64,
    pub fees: f64,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            markup_percentage: DEFAULT_QUOTE_MARKUP_PERCENT,
            fees: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogSettings {
    pub seed_path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            seed_path: "config/catalog.toml".to_string(),
        }
    }
}

/// Load `config/quoter.toml` (optional) with `QUOTER__SECTION__KEY` env overrides
pub fn load_quoter_config() -> anyhow::Result<QuoterConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn parse_quoter_config(toml: &str) -> anyhow::Result<QuoterConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}
