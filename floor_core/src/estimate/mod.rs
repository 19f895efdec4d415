//! # Estimator
//!
//! `estimate(answers, config)` turns one completed questionnaire into an area
//! and a min/max cost range. It is a pure function: no state, no I/O, and the
//! result shares nothing with its inputs.
//!
//! ## Pipeline
//!
//! 1. [`area::take_off`] measures every room, inferring unanswered sizes
//! 2. base area x `wastage_multiplier` = billable area
//! 3. [`costs`] prices each line from the billable area
//! 4. totals are summed unrounded; every output is rounded once at the end
//!
//! ## Example
//!
//! ```rust
//! use floor_core::answers::{Answers, FlooringType};
//! use floor_core::config::DEFAULT_CONFIG;
//! use floor_core::estimate::estimate;
//!
//! let mut answers = Answers::default();
//! answers.current_flooring.insert(FlooringType::Carpet);
//!
//! let result = estimate(&answers, &DEFAULT_CONFIG);
//! assert_eq!(result.rounded_area, 127);
//! assert_eq!(result.breakdown.material_cost, 5693);
//! assert!(result.total.min <= result.total.max);
//! ```

pub mod area;
pub mod costs;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::answers::Answers;
use crate::config::EstimatorConfig;
use crate::units::{round_to_i64, CostRange, RateRange};

pub use area::{AreaTakeoff, RoomAssumptions};

/// Rounded breakdown of the estimate, one entry per cost line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Floor area before wastage (m²)
    pub base_area: i64,
    /// Material is a fixed price per product, so it has no range
    pub material_cost: i64,
    pub install: CostRange,
    pub levelling: CostRange,
    pub removal: CostRange,
    pub edge: CostRange,
    pub stairs: CostRange,
    pub skip_bin: CostRange,
}

impl CostBreakdown {
    /// Every ranged line with its customer-facing label, in display order
    pub fn ranges(&self) -> [(&'static str, CostRange); 6] {
        [
            ("Installation", self.install),
            ("Floor levelling", self.levelling),
            ("Removing old floors", self.removal),
            ("Edge finishing (scotia / skirting)", self.edge),
            ("Stairs (if any)", self.stairs),
            ("Skip bin (if needed)", self.skip_bin),
        ]
    }
}

/// Output of [`estimate`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "rounded_area": 127,
///   "total": { "min": 12144, "max": 14548 },
///   "breakdown": {
///     "base_area": 115,
///     "material_cost": 5693,
///     "install": { "min": 3795, "max": 5060 },
///     "levelling": { "min": 1265, "max": 1898 },
///     "removal": { "min": 633, "max": 886 },
///     "edge": { "min": 759, "max": 1012 },
///     "stairs": { "min": 0, "max": 0 },
///     "skip_bin": { "min": 0, "max": 0 }
///   },
///   "skip_bin_tier": null,
///   "assumptions": { "living_count": 2, "living_size": "medium", "kitchen_size": "medium" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Billable area (base area plus wastage), rounded to whole m²
    pub rounded_area: i64,
    pub total: CostRange,
    pub breakdown: CostBreakdown,
    /// Id of the skip bin tier quoted, if one is needed
    pub skip_bin_tier: Option<String>,
    /// Living/kitchen values used after inference
    pub assumptions: RoomAssumptions,
}

/// Estimate area and cost for one questionnaire.
///
/// Total over every `Answers` value; there is no failure mode.
pub fn estimate(answers: &Answers, config: &EstimatorConfig) -> CalculationResult {
    let takeoff = area::take_off(answers, &config.area_presets);
    let base_area = takeoff.base_area();
    let billable_area = base_area * config.wastage_multiplier;

    debug!(
        bedrooms = answers.bedrooms_count,
        living_count = takeoff.assumptions.living_count,
        living_size = %takeoff.assumptions.living_size,
        base_area = base_area.value(),
        billable_area = billable_area.value(),
        "area take-off complete"
    );

    let material = billable_area.value() * config.material_rates.rate(answers.product);
    let install = config.install_rate.scale(billable_area.value());
    let levelling = config
        .levelling_rates
        .rate(answers.floor_evenness)
        .scale(billable_area.value());
    let removal = costs::removal(answers, billable_area, &config.removal_rates);
    let edge = costs::edge_finish(answers.finish_type, billable_area, &config.edge_rates);
    let stairs = costs::stairs(&takeoff.stairs, &config.stairs_cost);
    let skip_bin = costs::skip_bin(answers, billable_area, config);
    let skip_bin_cost = skip_bin.map(|tier| tier.cost()).unwrap_or(RateRange::ZERO);

    let total = RateRange::point(material)
        + install
        + levelling
        + removal
        + edge
        + stairs
        + skip_bin_cost;

    debug!(
        skip_bin = skip_bin.map(|tier| tier.id.as_str()).unwrap_or("none"),
        total_min = total.min,
        total_max = total.max,
        "estimate complete"
    );

    CalculationResult {
        rounded_area: billable_area.rounded(),
        total: total.round(),
        breakdown: CostBreakdown {
            base_area: base_area.rounded(),
            material_cost: round_to_i64(material),
            install: install.round(),
            levelling: levelling.round(),
            removal: removal.round(),
            edge: edge.round(),
            stairs: stairs.round(),
            skip_bin: skip_bin_cost.round(),
        },
        skip_bin_tier: skip_bin.map(|tier| tier.id.clone()),
        assumptions: takeoff.assumptions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{
        Answer, ContactDetails, FinishType, FloorEvenness, FlooringType, LivingSpaces, ProductType,
        RoomSize, StairsBand,
    };
    use crate::config::SkipBinTier;

    /// 3 medium bedrooms, 2 medium living, medium kitchen, hallways, carpet, scotia
    fn three_bedroom_carpet() -> Answers {
        Answers {
            product: ProductType::HybridPlus,
            bedrooms_count: 3,
            bedroom_size: RoomSize::Medium,
            living_count: Answer::Explicit(LivingSpaces::new(2).unwrap()),
            living_size: Answer::Explicit(RoomSize::Medium),
            include_kitchen: true,
            kitchen_size: Answer::Explicit(RoomSize::Medium),
            include_hallways: true,
            stairs_band: StairsBand::None,
            floor_evenness: FloorEvenness::MostlyEven,
            current_flooring: [FlooringType::Carpet].into_iter().collect(),
            finish_type: Answer::Explicit(FinishType::Scotia),
            contact: ContactDetails::default(),
        }
    }

    fn empty_home() -> Answers {
        Answers {
            bedrooms_count: 0,
            living_count: Answer::Explicit(LivingSpaces::new(0).unwrap()),
            include_kitchen: false,
            include_hallways: false,
            stairs_band: StairsBand::None,
            current_flooring: Default::default(),
            ..Answers::default()
        }
    }

    /// A spread of answer combinations for property checks
    fn answer_variants() -> Vec<Answers> {
        let mut variants = Vec::new();
        for living_count in [Answer::Unspecified, Answer::Explicit(LivingSpaces::new(1).unwrap())] {
            for living_size in [Answer::Unspecified, Answer::Explicit(RoomSize::Small)] {
                for stairs_band in [StairsBand::None, StairsBand::Steps20Plus] {
                    for flooring in [
                        vec![],
                        vec![FlooringType::NotSure],
                        vec![FlooringType::Tiles, FlooringType::Carpet],
                        vec![FlooringType::Concrete],
                    ] {
                        let skirting = Answer::Explicit(FinishType::Skirting);
                        for finish_type in [Answer::Unspecified, skirting] {
                            variants.push(Answers {
                                living_count,
                                living_size,
                                kitchen_size: Answer::Unspecified,
                                stairs_band,
                                floor_evenness: FloorEvenness::VeryUneven,
                                current_flooring: flooring.iter().copied().collect(),
                                finish_type,
                                ..Answers::default()
                            });
                        }
                    }
                }
            }
        }
        variants
    }

    fn all_ranges(result: &CalculationResult) -> Vec<CostRange> {
        let mut ranges: Vec<CostRange> =
            result.breakdown.ranges().iter().map(|(_, r)| *r).collect();
        ranges.push(result.total);
        ranges
    }

    #[test]
    fn test_three_bedroom_scenario() {
        let result = estimate(&three_bedroom_carpet(), &EstimatorConfig::default());

        assert_eq!(result.breakdown.base_area, 115);
        assert_eq!(result.rounded_area, 127);
        assert_eq!(result.breakdown.material_cost, 5693);
        assert_eq!(result.breakdown.install, CostRange::new(3795, 5060));
        assert_eq!(result.breakdown.levelling, CostRange::new(1265, 1898));
        assert_eq!(result.breakdown.removal, CostRange::new(633, 886));
        assert_eq!(result.breakdown.edge, CostRange::new(759, 1012));
        assert_eq!(result.breakdown.stairs, CostRange::new(0, 0));
        assert_eq!(result.breakdown.skip_bin, CostRange::new(0, 0));
        assert_eq!(result.skip_bin_tier, None);
        assert_eq!(result.total, CostRange::new(12144, 14548));
    }

    #[test]
    fn test_empty_home_scenario() {
        let result = estimate(&empty_home(), &EstimatorConfig::default());

        assert_eq!(result.breakdown.base_area, 0);
        assert_eq!(result.rounded_area, 0);
        assert_eq!(result.breakdown.material_cost, 0);
        assert_eq!(result.total, CostRange::new(0, 0));
        for range in all_ranges(&result) {
            assert_eq!(range, CostRange::new(0, 0));
        }
        assert_eq!(result.skip_bin_tier, None);
    }

    #[test]
    fn test_determinism() {
        let config = EstimatorConfig::default();
        for answers in answer_variants() {
            assert_eq!(estimate(&answers, &config), estimate(&answers, &config));
        }
    }

    #[test]
    fn test_monotonic_in_bedrooms() {
        let config = EstimatorConfig::default();
        for template in answer_variants() {
            let mut previous: Option<CalculationResult> = None;
            for bedrooms in 0..=8 {
                let answers = Answers {
                    bedrooms_count: bedrooms,
                    ..template.clone()
                };
                let result = estimate(&answers, &config);
                if let Some(prev) = &previous {
                    assert!(
                        result.breakdown.base_area >= prev.breakdown.base_area,
                        "base area fell at {}",
                        bedrooms
                    );
                    assert!(result.total.min >= prev.total.min, "total min fell at {}", bedrooms);
                    assert!(result.total.max >= prev.total.max, "total max fell at {}", bedrooms);
                }
                previous = Some(result);
            }
        }
    }

    #[test]
    fn test_non_negative_and_ordered() {
        let config = EstimatorConfig::default();
        for template in answer_variants() {
            for bedrooms in [0, 1, 3, 6] {
                let answers = Answers {
                    bedrooms_count: bedrooms,
                    ..template.clone()
                };
                let result = estimate(&answers, &config);
                assert!(result.rounded_area >= 0);
                assert!(result.breakdown.base_area >= 0);
                assert!(result.breakdown.material_cost >= 0);
                for range in all_ranges(&result) {
                    assert!(range.min >= 0);
                    assert!(range.is_ordered(), "{:?} out of order", range);
                }
            }
        }
    }

    #[test]
    fn test_skip_bin_tier_boundary() {
        // 1 small living space only: 18 m², no wastage
        let answers = Answers {
            bedrooms_count: 0,
            living_count: Answer::Explicit(LivingSpaces::new(1).unwrap()),
            living_size: Answer::Explicit(RoomSize::Small),
            include_kitchen: false,
            include_hallways: false,
            current_flooring: [FlooringType::Tiles].into_iter().collect(),
            ..Answers::default()
        };
        let mut config = EstimatorConfig::default();
        config.wastage_multiplier = 1.0;
        config.skip_bins = vec![
            SkipBinTier::new("exact", 100.0, 110.0, 18.0),
            SkipBinTier::new("next", 200.0, 220.0, 30.0),
        ];

        let result = estimate(&answers, &config);
        assert_eq!(result.rounded_area, 18);
        assert_eq!(result.skip_bin_tier.as_deref(), Some("exact"));
        assert_eq!(result.breakdown.skip_bin, CostRange::new(100, 110));

        config.skip_bins[1].max_area = 17.0;
        config.skip_bins[0].max_area = 10.0;
        let result = estimate(&answers, &config);
        assert_eq!(result.skip_bin_tier.as_deref(), Some("next"));
        assert_eq!(result.breakdown.skip_bin, CostRange::new(200, 220));
    }

    #[test]
    fn test_inference_consistency() {
        let config = EstimatorConfig::default();
        let explicit = Answers {
            bedrooms_count: 4,
            living_count: Answer::Explicit(LivingSpaces::new(2).unwrap()),
            ..Answers::default()
        };
        let inferred = Answers {
            living_count: Answer::Unspecified,
            ..explicit.clone()
        };
        let single = Answers {
            living_count: Answer::Explicit(LivingSpaces::new(1).unwrap()),
            ..explicit.clone()
        };

        let explicit = estimate(&explicit, &config);
        assert_eq!(explicit.assumptions.living_count, 2);
        assert_eq!(estimate(&inferred, &config), explicit);
        assert_eq!(estimate(&single, &config), explicit);
    }

    #[test]
    fn test_unknown_flooring_needs_bin_and_blend() {
        let answers = Answers {
            current_flooring: [FlooringType::NotSure].into_iter().collect(),
            ..three_bedroom_carpet()
        };
        let result = estimate(&answers, &EstimatorConfig::default());

        // 126.5 m² is past the 3m tier's 120 m²
        assert_eq!(result.skip_bin_tier.as_deref(), Some("4m"));
        assert_eq!(result.breakdown.skip_bin, CostRange::new(604, 824));
        // 126.5 x (0.4 x 30 + 0.4 x 8 + 0.2 x 5) = 126.5 x 16.2
        assert_eq!(result.breakdown.removal.min, 2049);
    }

    #[test]
    fn test_stairs_and_undecided_finish() {
        let answers = Answers {
            stairs_band: StairsBand::Steps12To14,
            finish_type: Answer::Unspecified,
            ..three_bedroom_carpet()
        };
        let result = estimate(&answers, &EstimatorConfig::default());

        // 13 x 60 + 1 x 50, 13 x 80 + 1 x 65
        assert_eq!(result.breakdown.stairs, CostRange::new(830, 1105));
        // (115 + 4.5) x 1.1 = 131.45 m²
        assert_eq!(result.rounded_area, 131);
        // 131.45 x 6, 131.45 x 16
        assert_eq!(result.breakdown.edge, CostRange::new(789, 2103));
    }

    #[test]
    fn test_result_does_not_alias_config() {
        let mut config = EstimatorConfig::default();
        let answers = Answers {
            current_flooring: [FlooringType::Tiles].into_iter().collect(),
            ..Answers::default()
        };
        let result = estimate(&answers, &config);
        config.skip_bins[2].id = "renamed".to_string();
        assert_eq!(result.skip_bin_tier.as_deref(), Some("4m"));
    }

    #[test]
    fn test_result_json_shape() {
        let result = estimate(&three_bedroom_carpet(), &EstimatorConfig::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["rounded_area"], 127);
        assert_eq!(json["breakdown"]["removal"]["max"], 886);
        assert_eq!(json["assumptions"]["living_size"], "medium");
        assert!(json["skip_bin_tier"].is_null());
    }
}
