// Length and power unit normalisation
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::TileSpec;
use super::error::{require_finite, QuoteError, QuoteResult};

pub const METERS_PER_FOOT: f64 = 0.3048;
pub const INCHES_PER_METER: f64 = 39.3701;
pub const BTU_PER_HOUR_PER_WATT: f64 = 3.412141;

/// How a requested display dimension was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LengthUnit {
    Feet,
    Meters,
    TileCount,
}

/// Which physical edge of a tile a tile-count value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl LengthUnit {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Feet => "ft",
            Self::Meters => "m",
            Self::TileCount => "tiles",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feet" | "foot" | "ft" => Ok(Self::Feet),
            "meters" | "metres" | "m" => Ok(Self::Meters),
            "tiles" | "tilecount" | "tile_count" => Ok(Self::TileCount),
            other => Err(QuoteError::invalid(format!("unknown length unit '{other}'"))),
        }
    }
}

/// Converts a dimension to meters. Tile counts need the tile so the matching
/// physical edge can be used.
pub fn to_meters(value: f64, unit: LengthUnit, tile: Option<&TileSpec>, axis: Axis) -> QuoteResult<f64> {
    let value = require_finite("dimension", value)?;
    match unit {
        LengthUnit::Feet => Ok(value * METERS_PER_FOOT),
        LengthUnit::Meters => Ok(value),
        LengthUnit::TileCount => {
            let tile = tile.ok_or_else(|| {
                QuoteError::invalid("a tile spec is required to convert a tile count")
            })?;
            let edge_m = match axis {
                Axis::Width => tile.tile_width_m(),
                Axis::Height => tile.tile_height_m(),
            };
            Ok(value * edge_m)
        }
    }
}

pub fn watts_to_btu_per_hour(watts: f64) -> f64 {
    watts * BTU_PER_HOUR_PER_WATT
}

/// Renders a length as feet and inches rounded to the nearest half inch,
/// e.g. `12'` or `4' 3.5"`. Rounding up to 12" rolls over into the next foot.
pub fn meters_to_feet_inches(meters: f64) -> String {
    let total_inches = meters * INCHES_PER_METER;
    let feet = (total_inches / 12.0).floor();
    let inches = total_inches - feet * 12.0;
    let rounded = (inches * 2.0).round() / 2.0;

    if rounded == 0.0 {
        format!("{feet}'")
    } else if rounded == 12.0 {
        format!("{}'", feet + 1.0)
    } else {
        format!("{feet}' {rounded}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ReceivingCardType;

    fn tile() -> TileSpec {
        TileSpec {
            pixel_pitch_mm: 2.6,
            physical_width_mm: 500.0,
            physical_height_mm: 1000.0,
            pixel_width: 192,
            pixel_height: 384,
            weight_kg: 11.5,
            max_power_w: 180.0,
            avg_power_w: 60.0,
            brightness_nits: 5000.0,
            refresh_rate_hz: 3840.0,
            receiving_card_type: ReceivingCardType::NovaStar,
            scan_rate: None,
            buy_price: 400.0,
            sell_price: 600.0,
        }
    }

    #[test]
    fn test_to_meters() {
        let feet = to_meters(10.0, LengthUnit::Feet, None, Axis::Width).unwrap();
        assert!((feet - 3.048).abs() < 1e-12);
        assert_eq!(to_meters(2.5, LengthUnit::Meters, None, Axis::Width).unwrap(), 2.5);

        let spec = tile();
        assert_eq!(to_meters(4.0, LengthUnit::TileCount, Some(&spec), Axis::Width).unwrap(), 2.0);
        assert_eq!(to_meters(3.0, LengthUnit::TileCount, Some(&spec), Axis::Height).unwrap(), 3.0);
    }

    #[test]
    fn test_tile_count_requires_tile() {
        let err = to_meters(4.0, LengthUnit::TileCount, None, Axis::Width).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidInput(_)));
    }

    #[test]
    fn test_non_numeric_dimension_rejected() {
        assert!(to_meters(f64::NAN, LengthUnit::Meters, None, Axis::Width).is_err());
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("Feet".parse::<LengthUnit>().unwrap(), LengthUnit::Feet);
        assert_eq!("m".parse::<LengthUnit>().unwrap(), LengthUnit::Meters);
        assert_eq!("tileCount".parse::<LengthUnit>().unwrap(), LengthUnit::TileCount);
        assert!(matches!("yards".parse::<LengthUnit>(), Err(QuoteError::InvalidInput(_))));
    }

    #[test]
    fn test_btu() {
        assert!((watts_to_btu_per_hour(1000.0) - 3412.141).abs() < 1e-9);
    }

    #[test]
    fn test_feet_inches() {
        assert_eq!(meters_to_feet_inches(3.6576), "12'");
        assert_eq!(meters_to_feet_inches(1.2954), "4' 3\"");
        // 0.5 m = 19.685" -> 1' 7.5"
        assert_eq!(meters_to_feet_inches(0.5), "1' 7.5\"");
        // 11.8" rounds to 12" and rolls over
        assert_eq!(meters_to_feet_inches(0.3), "1'");
        assert_eq!(meters_to_feet_inches(0.0), "0'");
    }
}
