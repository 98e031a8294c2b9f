// Display sizing: tile grid, resolution, power draw and processor class
use serde::{Deserialize, Serialize};

use super::catalog::TileSpec;
use super::error::{require_non_negative, require_positive, QuoteError, QuoteResult};
use super::units::{meters_to_feet_inches, to_meters, watts_to_btu_per_hour, Axis, LengthUnit};

/// Processor class required to drive a wall of a given pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorTier {
    Basic,
    Entry,
    Standard,
    Professional,
}

impl ProcessorTier {
    pub fn for_pixels(total_pixels: u64) -> Self {
        if total_pixels > 2_000_000 {
            Self::Professional
        } else if total_pixels > 1_000_000 {
            Self::Standard
        } else if total_pixels > 500_000 {
            Self::Entry
        } else {
            Self::Basic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Professional => "Professional LED Processor (4K+)",
            Self::Standard => "Standard LED Processor (2K)",
            Self::Entry => "Entry LED Processor (1K)",
            Self::Basic => "Basic LED Processor",
        }
    }
}

/// A display size as the user entered it, against a chosen tile.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRequest {
    pub width_value: f64,
    pub height_value: f64,
    pub unit: LengthUnit,
    pub tile: TileSpec,
    pub nickname: Option<String>,
}

impl DisplayRequest {
    pub fn new(width_value: f64, height_value: f64, unit: LengthUnit, tile: TileSpec) -> Self {
        Self {
            width_value,
            height_value,
            unit,
            tile,
            nickname: None,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn width_m(&self) -> QuoteResult<f64> {
        to_meters(self.width_value, self.unit, Some(&self.tile), Axis::Width)
    }

    pub fn height_m(&self) -> QuoteResult<f64> {
        to_meters(self.height_value, self.unit, Some(&self.tile), Axis::Height)
    }

    /// Normalises the request to meters and sizes the grid. `unit_price`
    /// overrides the tile's catalog sell price for the cost estimate.
    pub fn calculate(&self, unit_price: Option<f64>) -> QuoteResult<DisplayResult> {
        calculate_display(self.width_m()?, self.height_m()?, &self.tile, unit_price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayResult {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub total_tiles: u32,
    pub actual_width_m: f64,
    pub actual_height_m: f64,
    pub total_area_m2: f64,
    pub total_power_max_w: f64,
    pub total_power_avg_w: f64,
    pub total_resolution_w: u64,
    pub total_resolution_h: u64,
    pub recommended_processor: ProcessorTier,
    pub estimated_cost: f64,
}

impl DisplayResult {
    pub fn total_pixels(&self) -> u64 {
        self.total_resolution_w.saturating_mul(self.total_resolution_h)
    }

    pub fn max_btu_per_hour(&self) -> f64 {
        watts_to_btu_per_hour(self.total_power_max_w)
    }

    pub fn avg_btu_per_hour(&self) -> f64 {
        watts_to_btu_per_hour(self.total_power_avg_w)
    }

    /// `W × H` in feet and inches.
    pub fn display_size_imperial(&self) -> String {
        format!(
            "{} × {}",
            meters_to_feet_inches(self.actual_width_m),
            meters_to_feet_inches(self.actual_height_m)
        )
    }

    pub fn is_empty(&self) -> bool {
        self.total_tiles == 0
    }
}

/// Fits whole tiles into the requested footprint. Tiles are floored, so the
/// actual display never exceeds the requested size; a zero-tile result is
/// valid and left to the caller.
pub fn calculate_display(
    requested_width_m: f64,
    requested_height_m: f64,
    tile: &TileSpec,
    unit_price: Option<f64>,
) -> QuoteResult<DisplayResult> {
    let requested_width_m = require_positive("requested width", requested_width_m)?;
    let requested_height_m = require_positive("requested height", requested_height_m)?;
    require_positive("tile physical width", tile.physical_width_mm)?;
    require_positive("tile physical height", tile.physical_height_mm)?;
    let unit_price = require_non_negative("tile unit price", unit_price.unwrap_or(tile.sell_price))?;

    let tile_width_m = tile.tile_width_m();
    let tile_height_m = tile.tile_height_m();

    let tiles_x = tiles_along("width", requested_width_m, tile_width_m)?;
    let tiles_y = tiles_along("height", requested_height_m, tile_height_m)?;
    let total_tiles = tiles_x
        .checked_mul(tiles_y)
        .ok_or_else(|| QuoteError::invalid(format!("{tiles_x} x {tiles_y} tiles is too large a display")))?;

    let actual_width_m = tiles_x as f64 * tile_width_m;
    let actual_height_m = tiles_y as f64 * tile_height_m;

    let total_resolution_w = tiles_x as u64 * tile.pixel_width as u64;
    let total_resolution_h = tiles_y as u64 * tile.pixel_height as u64;
    let total_pixels = total_resolution_w
        .checked_mul(total_resolution_h)
        .ok_or_else(|| QuoteError::invalid("display resolution exceeds the supported pixel count"))?;

    Ok(DisplayResult {
        tiles_x,
        tiles_y,
        total_tiles,
        actual_width_m,
        actual_height_m,
        total_area_m2: actual_width_m * actual_height_m,
        total_power_max_w: total_tiles as f64 * tile.max_power_w,
        total_power_avg_w: total_tiles as f64 * tile.avg_power_w,
        total_resolution_w,
        total_resolution_h,
        recommended_processor: ProcessorTier::for_pixels(total_pixels),
        estimated_cost: total_tiles as f64 * unit_price,
    })
}

/// Largest whole tile count whose edge fits within `requested_m`. The float
/// quotient is only a first guess; the result is settled by comparing
/// `n * tile_m` against the request, so aligned sizes keep their count and
/// the actual edge never exceeds the request.
fn tiles_along(axis: &str, requested_m: f64, tile_m: f64) -> QuoteResult<u32> {
    let mut n = (requested_m / tile_m).floor();
    if n >= u32::MAX as f64 {
        return Err(QuoteError::invalid(format!(
            "requested {axis} of {requested_m} m is too many tiles"
        )));
    }
    while n > 0.0 && n * tile_m > requested_m {
        n -= 1.0;
    }
    if (n + 1.0) * tile_m <= requested_m {
        n += 1.0;
    }
    Ok(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::fixtures::p25_tile;
    use crate::domain::error::QuoteError;
    use proptest::prelude::*;

    #[test]
    fn test_five_by_three_meters() {
        let result = calculate_display(5.0, 3.0, &p25_tile(), None).unwrap();
        assert_eq!((result.tiles_x, result.tiles_y), (10, 6));
        assert_eq!(result.total_tiles, 60);
        assert_eq!(result.actual_width_m, 5.0);
        assert_eq!(result.actual_height_m, 3.0);
        assert_eq!(result.total_area_m2, 15.0);
        assert_eq!(result.total_power_max_w, 7200.0);
        assert_eq!(result.total_power_avg_w, 2400.0);
        assert_eq!((result.total_resolution_w, result.total_resolution_h), (1920, 1152));
        assert_eq!(result.total_pixels(), 2_211_840);
        assert_eq!(result.recommended_processor, ProcessorTier::Professional);
        assert_eq!(result.estimated_cost, 60.0 * 650.0);
    }

    #[test]
    fn test_partial_tiles_are_floored() {
        let result = calculate_display(5.2, 3.3, &p25_tile(), Some(540.0)).unwrap();
        assert_eq!((result.tiles_x, result.tiles_y), (10, 6));
        assert_eq!(result.actual_width_m, 5.0);
        assert_eq!(result.estimated_cost, 60.0 * 540.0);
    }

    #[test]
    fn test_smaller_than_one_tile_is_empty() {
        let result = calculate_display(0.4, 3.0, &p25_tile(), None).unwrap();
        assert_eq!(result.tiles_x, 0);
        assert_eq!(result.total_tiles, 0);
        assert!(result.is_empty());
        assert_eq!(result.total_power_max_w, 0.0);
        assert_eq!(result.estimated_cost, 0.0);
        assert_eq!(result.recommended_processor, ProcessorTier::Basic);
    }

    #[test]
    fn test_invalid_dimensions() {
        let tile = p25_tile();
        assert!(matches!(
            calculate_display(0.0, 3.0, &tile, None),
            Err(QuoteError::InvalidInput(_))
        ));
        assert!(calculate_display(5.0, -1.0, &tile, None).is_err());

        let mut flat = p25_tile();
        flat.physical_height_mm = 0.0;
        assert!(calculate_display(5.0, 3.0, &flat, None).is_err());
    }

    #[test]
    fn test_width_just_under_one_tile_is_empty() {
        let result = calculate_display(0.4999999999, 1.0, &p25_tile(), None).unwrap();
        assert_eq!(result.tiles_x, 0);
        assert!(result.actual_width_m <= 0.4999999999);
    }

    #[test]
    fn test_aligned_size_keeps_its_tile_count() {
        let tile = TileSpec {
            physical_width_mm: 480.0,
            ..p25_tile()
        };
        let result = calculate_display(11.0 * 0.48, 1.0, &tile, None).unwrap();
        assert_eq!(result.tiles_x, 11);
        assert!(result.actual_width_m <= 11.0 * 0.48);
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        // 80000 x 80000 tiles does not fit a u32 tile count
        let err = calculate_display(40_000.0, 40_000.0, &p25_tile(), None).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidInput(_)));

        let err = calculate_display(1e10, 1.0, &p25_tile(), None).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidInput(_)));
    }

    #[test]
    fn test_request_in_feet_and_tiles() {
        // 16.4 ft = 4.99872 m -> 9 tiles wide
        let feet = DisplayRequest::new(16.4, 9.8, LengthUnit::Feet, p25_tile());
        let result = feet.calculate(None).unwrap();
        assert_eq!((result.tiles_x, result.tiles_y), (9, 5));

        let tiles = DisplayRequest::new(8.0, 4.0, LengthUnit::TileCount, p25_tile())
            .with_nickname("Main Stage");
        let result = tiles.calculate(None).unwrap();
        assert_eq!((result.tiles_x, result.tiles_y), (8, 4));
        assert_eq!(tiles.nickname.as_deref(), Some("Main Stage"));
    }

    #[test]
    fn test_processor_thresholds() {
        assert_eq!(ProcessorTier::for_pixels(2_000_001), ProcessorTier::Professional);
        assert_eq!(ProcessorTier::for_pixels(2_000_000), ProcessorTier::Standard);
        assert_eq!(ProcessorTier::for_pixels(1_000_001), ProcessorTier::Standard);
        assert_eq!(ProcessorTier::for_pixels(1_000_000), ProcessorTier::Entry);
        assert_eq!(ProcessorTier::for_pixels(500_001), ProcessorTier::Entry);
        assert_eq!(ProcessorTier::for_pixels(500_000), ProcessorTier::Basic);
        assert_eq!(ProcessorTier::for_pixels(0), ProcessorTier::Basic);
        assert_eq!(ProcessorTier::Standard.label(), "Standard LED Processor (2K)");
    }

    #[test]
    fn test_btu_and_imperial_readouts() {
        let result = calculate_display(5.0, 3.0, &p25_tile(), None).unwrap();
        assert!((result.max_btu_per_hour() - 7200.0 * 3.412141).abs() < 1e-6);
        assert!((result.avg_btu_per_hour() - 2400.0 * 3.412141).abs() < 1e-6);
        // 5 m = 196.85" = 16' 4.85" -> 16' 5"
        assert_eq!(result.display_size_imperial(), "16' 5\" × 9' 10\"");
    }

    fn tile_with(width_mm: f64, height_mm: f64) -> TileSpec {
        TileSpec {
            physical_width_mm: width_mm,
            physical_height_mm: height_mm,
            ..p25_tile()
        }
    }

    proptest! {
        #[test]
        fn prop_actual_never_exceeds_requested(
            width in 0.01f64..50.0,
            height in 0.01f64..30.0,
            tile_w in 100.0f64..1500.0,
            tile_h in 100.0f64..1500.0,
        ) {
            let result = calculate_display(width, height, &tile_with(tile_w, tile_h), None).unwrap();
            prop_assert!(result.actual_width_m <= width);
            prop_assert!(result.actual_height_m <= height);
            prop_assert_eq!(result.total_tiles, result.tiles_x * result.tiles_y);
            if width < tile_w / 1000.0 {
                prop_assert_eq!(result.tiles_x, 0);
                prop_assert_eq!(result.total_tiles, 0);
            }
        }

        #[test]
        fn prop_aligned_sizes_round_trip(
            tiles_x in 1u32..60,
            tiles_y in 1u32..40,
            tile_w in prop::sample::select(vec![250.0, 480.0, 500.0, 576.0, 600.0, 640.0, 1000.0]),
            tile_h in prop::sample::select(vec![250.0, 337.5, 500.0, 562.5, 1000.0]),
        ) {
            let tile = tile_with(tile_w, tile_h);
            let first = calculate_display(
                tiles_x as f64 * tile.tile_width_m(),
                tiles_y as f64 * tile.tile_height_m(),
                &tile,
                None,
            ).unwrap();
            prop_assert_eq!((first.tiles_x, first.tiles_y), (tiles_x, tiles_y));

            let again = calculate_display(first.actual_width_m, first.actual_height_m, &tile, None).unwrap();
            prop_assert_eq!((again.tiles_x, again.tiles_y), (first.tiles_x, first.tiles_y));
        }
    }
}
