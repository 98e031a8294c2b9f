// Sell price resolution for catalog items
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{require_finite, require_non_negative, QuoteError, QuoteResult};

pub const DEFAULT_GLOBAL_MARKUP_PERCENT: f64 = 20.0;
pub const DEFAULT_BESPOKE_MARKUP_PERCENT: f64 = 20.0;

/// Markup defaults in effect for a quoting session. Passed explicitly to
/// every price resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub global_markup_percent: f64,
    pub default_bespoke_markup_percent: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            global_markup_percent: DEFAULT_GLOBAL_MARKUP_PERCENT,
            default_bespoke_markup_percent: DEFAULT_BESPOKE_MARKUP_PERCENT,
        }
    }
}

impl PricingPolicy {
    pub fn with_global_markup(global_markup_percent: f64) -> Self {
        Self {
            global_markup_percent,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PricingMethod {
    /// Cost plus the policy's global markup.
    Global,
    /// Cost plus a per-item markup; the policy default applies when unset.
    Bespoke {
        #[serde(default)]
        markup_percent: Option<f64>,
    },
    /// A fixed sell price entered by hand.
    Manual {
        #[serde(default)]
        sell_price: Option<f64>,
    },
}

impl FromStr for PricingMethod {
    type Err = QuoteError;

    /// Parses the bare method name; bespoke and manual start without values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "bespoke" => Ok(Self::Bespoke { markup_percent: None }),
            "manual" => Ok(Self::Manual { sell_price: None }),
            other => Err(QuoteError::invalid(format!("unknown pricing method '{other}'"))),
        }
    }
}

/// Computes the unit sell price. Negative markups (discounts) are allowed.
pub fn resolve_sell_price(
    unit_cost: f64,
    method: &PricingMethod,
    policy: &PricingPolicy,
) -> QuoteResult<f64> {
    match method {
        PricingMethod::Global => {
            let cost = require_non_negative("unit cost", unit_cost)?;
            let markup = require_finite("global markup", policy.global_markup_percent)?;
            Ok(apply_markup(cost, markup))
        }
        PricingMethod::Bespoke { markup_percent } => {
            let cost = require_non_negative("unit cost", unit_cost)?;
            let markup = markup_percent.unwrap_or(policy.default_bespoke_markup_percent);
            let markup = require_finite("bespoke markup", markup)?;
            Ok(apply_markup(cost, markup))
        }
        PricingMethod::Manual { sell_price } => {
            let price = sell_price
                .ok_or_else(|| QuoteError::invalid("manual pricing requires a sell price"))?;
            require_non_negative("manual sell price", price)
        }
    }
}

fn apply_markup(cost: f64, markup_percent: f64) -> f64 {
    cost * (1.0 + markup_percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_global_markup() {
        let policy = PricingPolicy::default();
        let price = resolve_sell_price(450.0, &PricingMethod::Global, &policy).unwrap();
        assert!(approx(price, 540.0));

        let policy = PricingPolicy::with_global_markup(50.0);
        let price = resolve_sell_price(100.0, &PricingMethod::Global, &policy).unwrap();
        assert!(approx(price, 150.0));
    }

    #[test]
    fn test_bespoke_markup() {
        let policy = PricingPolicy::default();
        let explicit = PricingMethod::Bespoke { markup_percent: Some(35.0) };
        assert!(approx(resolve_sell_price(200.0, &explicit, &policy).unwrap(), 270.0));

        let unset = PricingMethod::Bespoke { markup_percent: None };
        assert!(approx(resolve_sell_price(200.0, &unset, &policy).unwrap(), 240.0));
    }

    #[test]
    fn test_negative_markup_is_a_discount() {
        let discount = PricingMethod::Bespoke { markup_percent: Some(-10.0) };
        let price = resolve_sell_price(100.0, &discount, &PricingPolicy::default()).unwrap();
        assert!(approx(price, 90.0));
    }

    #[test]
    fn test_manual_pricing() {
        let policy = PricingPolicy::default();
        let manual = PricingMethod::Manual { sell_price: Some(999.0) };
        assert_eq!(resolve_sell_price(450.0, &manual, &policy).unwrap(), 999.0);

        let missing = PricingMethod::Manual { sell_price: None };
        assert!(matches!(
            resolve_sell_price(450.0, &missing, &policy),
            Err(QuoteError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let result = resolve_sell_price(-1.0, &PricingMethod::Global, &PricingPolicy::default());
        assert!(matches!(result, Err(QuoteError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!("Global".parse::<PricingMethod>().unwrap(), PricingMethod::Global);
        assert_eq!(
            "bespoke".parse::<PricingMethod>().unwrap(),
            PricingMethod::Bespoke { markup_percent: None }
        );
        assert!("cost-plus".parse::<PricingMethod>().is_err());
    }
}
