//! # Cost Lines
//!
//! Each function prices one line of the breakdown from the billable area
//! (or, for stairs, from step and trim counts). Nothing is rounded here.

use crate::answers::{Answer, Answers, FinishType, FlooringType};
use crate::config::{
    EdgeRates, EstimatorConfig, RemovalRates, SkipBinTier, StairsCost, StairsPreset,
};
use crate::units::{RateRange, SquareMetres};

/// Assumed mix of coverings when the customer doesn't know what is down
const UNKNOWN_FLOORING_BLEND: [(FlooringType, f64); 3] = [
    (FlooringType::Tiles, 0.4),
    (FlooringType::Floorboards, 0.4),
    (FlooringType::Carpet, 0.2),
];

/// Removal of the existing coverings.
///
/// - known coverings selected: billable area split evenly between them, the
///   "not sure" marker is ignored
/// - only "not sure" selected: 40% tiles, 40% floorboards, 20% carpet
/// - nothing selected: no removal
pub fn removal(answers: &Answers, billable_area: SquareMetres, rates: &RemovalRates) -> RateRange {
    let known: Vec<RateRange> = answers
        .known_flooring()
        .filter_map(|covering| rates.rate(covering))
        .collect();

    if !known.is_empty() {
        let slice = billable_area.value() / known.len() as f64;
        return known.iter().map(|rate| rate.scale(slice)).sum();
    }

    if answers.flooring_unknown() {
        return UNKNOWN_FLOORING_BLEND
            .iter()
            .filter_map(|(covering, share)| {
                rates
                    .rate(*covering)
                    .map(|rate| rate.scale(billable_area.value() * share))
            })
            .sum();
    }

    RateRange::ZERO
}

/// Edge finishing; an undecided customer is quoted the full scotia-to-skirting span
pub fn edge_finish(
    finish: Answer<FinishType>,
    billable_area: SquareMetres,
    rates: &EdgeRates,
) -> RateRange {
    let rate = match finish {
        Answer::Explicit(finish) => rates.rate(finish),
        Answer::Unspecified => rates.safe_span(),
    };
    rate.scale(billable_area.value())
}

/// Stair labour per step plus bullnose trims
pub fn stairs(preset: &StairsPreset, cost: &StairsCost) -> RateRange {
    let labour = cost.labour_per_step.scale(f64::from(preset.steps));
    let bullnose = cost.bullnose_price.scale(f64::from(preset.bullnose));
    labour + bullnose
}

/// Skip bin tier for the job, or `None` when nothing bulky comes up
/// (carpet and concrete only).
pub fn skip_bin<'a>(
    answers: &Answers,
    billable_area: SquareMetres,
    config: &'a EstimatorConfig,
) -> Option<&'a SkipBinTier> {
    let needed = answers.current_flooring.iter().any(FlooringType::needs_skip_bin);
    if needed {
        config.skip_bin_for(billable_area)
    } else {
        None
    }
}
