//! # Rate Table
//!
//! `EstimatorConfig` holds every price, area preset and tier the estimator
//! reads. It is built once (from [`Default`] or a JSON file, see
//! [`crate::file_io::load_config`]) and only ever borrowed afterwards, so a
//! single instance can back any number of concurrent estimates.
//!
//! Each lookup table is an explicit struct with one field per option, which
//! means every answer always has a rate: there is no "missing key" case.
//!
//! ## Example
//!
//! ```rust
//! use floor_core::config::{EstimatorConfig, DEFAULT_CONFIG};
//! use floor_core::answers::ProductType;
//!
//! assert_eq!(DEFAULT_CONFIG.material_rates.rate(ProductType::HybridPlus), 45.0);
//!
//! let mut config = EstimatorConfig::default();
//! config.skip_bins.reverse();
//! assert!(config.validate().is_err());
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::answers::{FinishType, FloorEvenness, FlooringType, ProductType, RoomSize, StairsBand};
use crate::errors::{EstimateError, EstimateResult};
use crate::units::{RateRange, SquareMetres};

/// Built-in rate table, shared read-only for the life of the process
pub static DEFAULT_CONFIG: Lazy<EstimatorConfig> = Lazy::new(EstimatorConfig::default);

/// Complete rate table for the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Inflates usable area to cover offcuts (1.1 = 10% waste)
    pub wastage_multiplier: f64,

    /// Material price per m², per product
    pub material_rates: MaterialRates,

    /// Representative room areas
    pub area_presets: AreaPresets,

    /// Installation labour per m²
    pub install_rate: RateRange,

    /// Subfloor levelling per m², per evenness answer
    pub levelling_rates: LevellingRates,

    /// Removal of the existing covering per m²
    pub removal_rates: RemovalRates,

    /// Edge finishing per m² of floor
    pub edge_rates: EdgeRates,

    /// Stair labour and trim
    pub stairs_cost: StairsCost,

    /// Skip bin tiers, ascending by `max_area`. The last tier is the catch-all.
    pub skip_bins: Vec<SkipBinTier>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            wastage_multiplier: 1.1,
            material_rates: MaterialRates {
                eight_h: 35.0,
                hybrid_plus: 45.0,
                cloud_step: 55.0,
            },
            area_presets: AreaPresets {
                bedroom: BedroomPresets {
                    small: 10.0,
                    medium: 13.0,
                    large: 17.0,
                    walk_in_robe: 2.0,
                },
                living: RoomPresets {
                    small: 18.0,
                    medium: 25.0,
                    large: 32.0,
                },
                kitchen: RoomPresets {
                    small: 8.0,
                    medium: 12.0,
                    large: 16.0,
                },
                hallway: HallwayPresets {
                    small: 8.0,
                    large: 12.0,
                },
                stairs: StairsPresets {
                    none: StairsPreset::new(0.0, 0, 0),
                    steps_12_14: StairsPreset::new(4.5, 13, 1),
                    steps_15_17: StairsPreset::new(5.0, 16, 1),
                    steps_18_20: StairsPreset::new(5.5, 19, 2),
                    steps_20_plus: StairsPreset::new(6.0, 21, 3),
                },
            },
            install_rate: RateRange::new(30.0, 40.0),
            levelling_rates: LevellingRates {
                mostly_even: RateRange::new(10.0, 15.0),
                little_uneven: RateRange::new(12.0, 20.0),
                very_uneven: RateRange::new(20.0, 35.0),
                not_sure: RateRange::new(10.0, 18.0),
            },
            removal_rates: RemovalRates {
                carpet: RateRange::new(5.0, 7.0),
                tiles: RateRange::new(30.0, 45.0),
                floorboards: RateRange::new(8.0, 12.0),
                concrete: RateRange::new(0.0, 0.0),
            },
            edge_rates: EdgeRates {
                scotia: RateRange::new(6.0, 8.0),
                skirting: RateRange::new(12.0, 16.0),
            },
            stairs_cost: StairsCost {
                labour_per_step: RateRange::new(60.0, 80.0),
                bullnose_price: RateRange::new(50.0, 65.0),
            },
            skip_bins: vec![
                SkipBinTier::new("2m", 424.0, 504.0, 60.0),
                SkipBinTier::new("3m", 504.0, 604.0, 120.0),
                SkipBinTier::new("4m", 604.0, 824.0, 180.0),
                SkipBinTier::new("6m", 824.0, 900.0, 9999.0),
            ],
        }
    }
}

impl EstimatorConfig {
    /// Smallest tier that fits `billable_area`, falling back to the largest.
    ///
    /// An area exactly on a tier's `max_area` selects that tier.
    /// Returns `None` only for an empty tier list.
    pub fn skip_bin_for(&self, billable_area: SquareMetres) -> Option<&SkipBinTier> {
        self.skip_bins
            .iter()
            .find(|tier| billable_area.value() <= tier.max_area)
            .or_else(|| self.skip_bins.last())
    }

    /// Check the table's invariants: finite non-negative values, `min <= max`
    /// for every range, and a non-empty ascending skip bin list.
    pub fn validate(&self) -> EstimateResult<()> {
        if !self.wastage_multiplier.is_finite() || self.wastage_multiplier <= 1.0 {
            return Err(EstimateError::invalid_config(
                "wastage_multiplier",
                self.wastage_multiplier.to_string(),
                "Wastage multiplier must be greater than 1.0",
            ));
        }

        let m = &self.material_rates;
        check_amount("material_rates.8H", m.eight_h)?;
        check_amount("material_rates.HybridPlus", m.hybrid_plus)?;
        check_amount("material_rates.CloudStep", m.cloud_step)?;

        let p = &self.area_presets;
        check_amount("area_presets.bedroom.small", p.bedroom.small)?;
        check_amount("area_presets.bedroom.medium", p.bedroom.medium)?;
        check_amount("area_presets.bedroom.large", p.bedroom.large)?;
        check_amount("area_presets.bedroom.walk_in_robe", p.bedroom.walk_in_robe)?;
        for (name, room) in [("living", &p.living), ("kitchen", &p.kitchen)] {
            check_amount(&format!("area_presets.{}.small", name), room.small)?;
            check_amount(&format!("area_presets.{}.medium", name), room.medium)?;
            check_amount(&format!("area_presets.{}.large", name), room.large)?;
        }
        check_amount("area_presets.hallway.small", p.hallway.small)?;
        check_amount("area_presets.hallway.large", p.hallway.large)?;
        for band in StairsBand::ALL {
            let field = format!("area_presets.stairs.{}.area", band.code());
            check_amount(&field, p.stairs.get(band).area)?;
        }

        check_range("install_rate", self.install_rate)?;

        let l = &self.levelling_rates;
        check_range("levelling_rates.mostly_even", l.mostly_even)?;
        check_range("levelling_rates.little_uneven", l.little_uneven)?;
        check_range("levelling_rates.very_uneven", l.very_uneven)?;
        check_range("levelling_rates.not_sure", l.not_sure)?;

        let r = &self.removal_rates;
        check_range("removal_rates.carpet", r.carpet)?;
        check_range("removal_rates.tiles", r.tiles)?;
        check_range("removal_rates.floorboards", r.floorboards)?;
        check_range("removal_rates.concrete", r.concrete)?;

        check_range("edge_rates.scotia", self.edge_rates.scotia)?;
        check_range("edge_rates.skirting", self.edge_rates.skirting)?;
        check_range("stairs_cost.labour_per_step", self.stairs_cost.labour_per_step)?;
        check_range("stairs_cost.bullnose_price", self.stairs_cost.bullnose_price)?;

        if self.skip_bins.is_empty() {
            return Err(EstimateError::invalid_config(
                "skip_bins",
                "[]",
                "At least one skip bin tier is required",
            ));
        }
        for tier in &self.skip_bins {
            check_range(&format!("skip_bins.{}", tier.id), tier.cost())?;
            check_amount(&format!("skip_bins.{}.max_area", tier.id), tier.max_area)?;
        }
        for pair in self.skip_bins.windows(2) {
            if pair[1].max_area < pair[0].max_area {
                return Err(EstimateError::invalid_config(
                    format!("skip_bins.{}.max_area", pair[1].id),
                    pair[1].max_area.to_string(),
                    format!(
                        "Tiers must ascend by max_area (previous tier '{}' allows {})",
                        pair[0].id, pair[0].max_area
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn check_amount(field: &str, value: f64) -> EstimateResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::invalid_config(
            field,
            value.to_string(),
            "Value must be a finite number >= 0",
        ));
    }
    Ok(())
}

fn check_range(field: &str, range: RateRange) -> EstimateResult<()> {
    check_amount(&format!("{}.min", field), range.min)?;
    check_amount(&format!("{}.max", field), range.max)?;
    if !range.is_ordered() {
        return Err(EstimateError::invalid_config(
            field,
            format!("{}..{}", range.min, range.max),
            "min must not exceed max",
        ));
    }
    Ok(())
}

// ============================================================================
// Lookup tables
// ============================================================================

/// Material price per m²
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialRates {
    #[serde(rename = "8H")]
    pub eight_h: f64,
    #[serde(rename = "HybridPlus")]
    pub hybrid_plus: f64,
    #[serde(rename = "CloudStep")]
    pub cloud_step: f64,
}

impl MaterialRates {
    pub fn rate(&self, product: ProductType) -> f64 {
        match product {
            ProductType::EightH => self.eight_h,
            ProductType::HybridPlus => self.hybrid_plus,
            ProductType::CloudStep => self.cloud_step,
        }
    }
}

/// Representative areas (m²) per room category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaPresets {
    pub bedroom: BedroomPresets,
    pub living: RoomPresets,
    pub kitchen: RoomPresets,
    pub hallway: HallwayPresets,
    pub stairs: StairsPresets,
}

/// Bedroom sizes plus the walk-in-robe allowance added to every bedroom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BedroomPresets {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
    pub walk_in_robe: f64,
}

impl BedroomPresets {
    pub fn area(&self, size: RoomSize) -> SquareMetres {
        SquareMetres(match size {
            RoomSize::Small => self.small,
            RoomSize::Medium => self.medium,
            RoomSize::Large => self.large,
        })
    }
}

/// Small/medium/large areas for living spaces and kitchens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomPresets {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl RoomPresets {
    pub fn area(&self, size: RoomSize) -> SquareMetres {
        SquareMetres(match size {
            RoomSize::Small => self.small,
            RoomSize::Medium => self.medium,
            RoomSize::Large => self.large,
        })
    }
}

/// Hallways only come in two sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HallwayPresets {
    pub small: f64,
    pub large: f64,
}

/// Floor area and trim counts for one stairs band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairsPreset {
    /// Tread area in m²
    pub area: f64,
    /// Number of steps
    pub steps: u32,
    /// Number of bullnose trims
    pub bullnose: u32,
}

impl StairsPreset {
    pub const fn new(area: f64, steps: u32, bullnose: u32) -> Self {
        StairsPreset { area, steps, bullnose }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairsPresets {
    pub none: StairsPreset,
    #[serde(rename = "12_14")]
    pub steps_12_14: StairsPreset,
    #[serde(rename = "15_17")]
    pub steps_15_17: StairsPreset,
    #[serde(rename = "18_20")]
    pub steps_18_20: StairsPreset,
    #[serde(rename = "20_plus")]
    pub steps_20_plus: StairsPreset,
}

impl StairsPresets {
    pub fn get(&self, band: StairsBand) -> StairsPreset {
        match band {
            StairsBand::None => self.none,
            StairsBand::Steps12To14 => self.steps_12_14,
            StairsBand::Steps15To17 => self.steps_15_17,
            StairsBand::Steps18To20 => self.steps_18_20,
            StairsBand::Steps20Plus => self.steps_20_plus,
        }
    }
}

/// Levelling rate per m², per evenness answer ("not sure" has its own rate)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevellingRates {
    pub mostly_even: RateRange,
    pub little_uneven: RateRange,
    pub very_uneven: RateRange,
    pub not_sure: RateRange,
}

impl LevellingRates {
    pub fn rate(&self, evenness: FloorEvenness) -> RateRange {
        match evenness {
            FloorEvenness::MostlyEven => self.mostly_even,
            FloorEvenness::LittleUneven => self.little_uneven,
            FloorEvenness::VeryUneven => self.very_uneven,
            FloorEvenness::NotSure => self.not_sure,
        }
    }
}

/// Removal rate per m² of existing covering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemovalRates {
    pub carpet: RateRange,
    pub tiles: RateRange,
    pub floorboards: RateRange,
    pub concrete: RateRange,
}

impl RemovalRates {
    /// Rate for a known covering; `None` for the "not sure" marker, which is
    /// priced as a blend by the estimator
    pub fn rate(&self, covering: FlooringType) -> Option<RateRange> {
        match covering {
            FlooringType::Carpet => Some(self.carpet),
            FlooringType::Tiles => Some(self.tiles),
            FlooringType::Floorboards => Some(self.floorboards),
            FlooringType::Concrete => Some(self.concrete),
            FlooringType::NotSure => None,
        }
    }
}

/// Edge finishing rate per m² of floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRates {
    pub scotia: RateRange,
    pub skirting: RateRange,
}

impl EdgeRates {
    pub fn rate(&self, finish: FinishType) -> RateRange {
        match finish {
            FinishType::Scotia => self.scotia,
            FinishType::Skirting => self.skirting,
        }
    }

    /// Range quoted when the customer hasn't chosen: cheapest scotia up to
    /// dearest skirting
    pub fn safe_span(&self) -> RateRange {
        RateRange::new(self.scotia.min, self.skirting.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairsCost {
    pub labour_per_step: RateRange,
    pub bullnose_price: RateRange,
}

/// One skip bin size with its hire price range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipBinTier {
    /// Bin size label (e.g. "3m")
    pub id: String,
    pub min: f64,
    pub max: f64,
    /// Largest billable area (m²) this bin handles
    pub max_area: f64,
}

impl SkipBinTier {
    pub fn new(id: impl Into<String>, min: f64, max: f64, max_area: f64) -> Self {
        SkipBinTier {
            id: id.into(),
            min,
            max,
            max_area,
        }
    }

    pub fn cost(&self) -> RateRange {
        RateRange::new(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EstimatorConfig::default().validate().is_ok());
        assert_eq!(*DEFAULT_CONFIG, EstimatorConfig::default());
    }

    #[test]
    fn test_lookups() {
        let config = EstimatorConfig::default();
        assert_eq!(config.material_rates.rate(ProductType::CloudStep), 55.0);
        assert_eq!(config.area_presets.bedroom.area(RoomSize::Large).value(), 17.0);
        assert_eq!(config.area_presets.kitchen.area(RoomSize::Small).value(), 8.0);
        assert_eq!(config.area_presets.stairs.get(StairsBand::Steps18To20).bullnose, 2);
        assert_eq!(config.levelling_rates.rate(FloorEvenness::NotSure), RateRange::new(10.0, 18.0));
        assert_eq!(
            config.removal_rates.rate(FlooringType::Tiles),
            Some(RateRange::new(30.0, 45.0))
        );
        assert_eq!(config.removal_rates.rate(FlooringType::NotSure), None);
        assert_eq!(config.edge_rates.safe_span(), RateRange::new(6.0, 16.0));
    }

    #[test]
    fn test_skip_bin_boundaries() {
        let config = EstimatorConfig::default();
        let id = |area: f64| config.skip_bin_for(SquareMetres(area)).map(|t| t.id.as_str());

        assert_eq!(id(0.0), Some("2m"));
        assert_eq!(id(60.0), Some("2m"));
        assert_eq!(id(60.01), Some("3m"));
        assert_eq!(id(120.0), Some("3m"));
        assert_eq!(id(180.0), Some("4m"));
        assert_eq!(id(9999.0), Some("6m"));
        assert_eq!(id(20000.0), Some("6m"));
    }

    #[test]
    fn test_skip_bin_fallback_to_last_tier() {
        let mut config = EstimatorConfig::default();
        config.skip_bins = vec![
            SkipBinTier::new("small", 100.0, 150.0, 10.0),
            SkipBinTier::new("big", 200.0, 250.0, 20.0),
        ];
        assert_eq!(config.skip_bin_for(SquareMetres(500.0)).unwrap().id, "big");

        config.skip_bins.clear();
        assert!(config.skip_bin_for(SquareMetres(5.0)).is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EstimatorConfig::default();
        config.wastage_multiplier = 0.9;
        assert_eq!(config.validate().unwrap_err().error_code(), "INVALID_CONFIG");

        let mut config = EstimatorConfig::default();
        config.wastage_multiplier = 1.0;
        match config.validate() {
            Err(EstimateError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "wastage_multiplier")
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
        config.wastage_multiplier = 1.05;
        assert!(config.validate().is_ok());

        let mut config = EstimatorConfig::default();
        config.removal_rates.tiles = RateRange::new(45.0, 30.0);
        match config.validate() {
            Err(EstimateError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "removal_rates.tiles")
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }

        let mut config = EstimatorConfig::default();
        config.install_rate.min = -1.0;
        assert!(config.validate().is_err());

        let mut config = EstimatorConfig::default();
        config.material_rates.eight_h = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = EstimatorConfig::default();
        config.skip_bins.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unsorted_bins() {
        let mut config = EstimatorConfig::default();
        config.skip_bins.swap(1, 2);
        match config.validate() {
            Err(EstimateError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "skip_bins.3m.max_area")
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_config_json_shape() {
        let json = serde_json::to_value(EstimatorConfig::default()).unwrap();
        assert_eq!(json["material_rates"]["8H"], 35.0);
        assert_eq!(json["area_presets"]["stairs"]["20_plus"]["steps"], 21);
        assert_eq!(json["skip_bins"][0]["id"], "2m");

        let roundtrip: EstimatorConfig = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, EstimatorConfig::default());
    }
}
