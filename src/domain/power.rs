// Electrical supply planning from subsystem power draws
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{require_non_negative, require_positive, QuoteResult};

pub const DEFAULT_SAFETY_FACTOR: f64 = 1.2;
pub const REDUNDANCY_BUFFER: f64 = 1.2;
pub const SUPPLY_COST_PER_WATT: f64 = 2.5;

const THREE_PHASE_THRESHOLD_W: f64 = 10_000.0;
const REDUNDANT_THRESHOLD_W: f64 = 5_000.0;
// Absorbs float noise such as 5000 * 1.1 = 5500.000000000001 before rounding up.
const ROUNDING_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Single,
    Three,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Single => "Single Phase",
            Phase::Three => "Three Phase",
        }
    }
}

/// Declared wattage per subsystem. Unset figures count as 0 W.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerInputs {
    #[serde(default)]
    pub display_w: f64,
    #[serde(default)]
    pub processor_w: f64,
    #[serde(default)]
    pub computing_w: f64,
    #[serde(default)]
    pub lighting_w: f64,
    #[serde(default)]
    pub audio_w: f64,
    /// Any further named subsystems.
    #[serde(default)]
    pub other_w: BTreeMap<String, f64>,
    #[serde(default = "default_safety_factor")]
    pub safety_factor: f64,
}

fn default_safety_factor() -> f64 {
    DEFAULT_SAFETY_FACTOR
}

impl Default for PowerInputs {
    fn default() -> Self {
        Self {
            display_w: 0.0,
            processor_w: 0.0,
            computing_w: 0.0,
            lighting_w: 0.0,
            audio_w: 0.0,
            other_w: BTreeMap::new(),
            safety_factor: DEFAULT_SAFETY_FACTOR,
        }
    }
}

impl PowerInputs {
    pub fn with_display(display_w: f64) -> Self {
        Self {
            display_w,
            ..Self::default()
        }
    }

    pub fn subsystem(mut self, name: impl Into<String>, watts: f64) -> Self {
        self.other_w.insert(name.into(), watts);
        self
    }

    fn validated_sum(&self) -> QuoteResult<f64> {
        let named = [
            ("display power", self.display_w),
            ("processor power", self.processor_w),
            ("computing power", self.computing_w),
            ("lighting power", self.lighting_w),
            ("audio power", self.audio_w),
        ];
        let mut sum = 0.0;
        for (field, watts) in named {
            sum += require_non_negative(field, watts)?;
        }
        for (name, watts) in &self.other_w {
            sum += require_non_negative(&format!("{name} power"), *watts)?;
        }
        Ok(sum)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerPlan {
    pub total_power_w: f64,
    pub recommended_capacity_w: f64,
    pub recommended_phase: Phase,
    pub redundant: bool,
    pub estimated_cost: f64,
}

pub fn plan_power(inputs: &PowerInputs) -> QuoteResult<PowerPlan> {
    let safety_factor = require_positive("safety factor", inputs.safety_factor)?;
    let total_power_w = inputs.validated_sum()? * safety_factor;

    let (step, recommended_phase, redundant) = if total_power_w > THREE_PHASE_THRESHOLD_W {
        (1000.0, Phase::Three, true)
    } else if total_power_w > REDUNDANT_THRESHOLD_W {
        (500.0, Phase::Single, true)
    } else {
        (100.0, Phase::Single, false)
    };

    let mut capacity = round_up_to(total_power_w, step);
    if redundant {
        capacity = (capacity * REDUNDANCY_BUFFER - ROUNDING_TOLERANCE).ceil();
    }

    Ok(PowerPlan {
        total_power_w,
        recommended_capacity_w: capacity,
        recommended_phase,
        redundant,
        estimated_cost: capacity * SUPPLY_COST_PER_WATT,
    })
}

fn round_up_to(value: f64, step: f64) -> f64 {
    ((value / step - ROUNDING_TOLERANCE).ceil() * step).max(0.0)
}
