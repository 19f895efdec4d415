//! # Area Take-off
//!
//! Turns room answers into floor area. Unanswered living and kitchen
//! questions are filled in from the bedroom count, which is the one number
//! every customer knows.
//!
//! | Bedrooms | Living spaces | Living / kitchen size | Hallway |
//! |----------|---------------|-----------------------|---------|
//! | 0-2      | 1             | small                 | small   |
//! | 3        | 2             | medium                | small   |
//! | 4+       | 2 (minimum)   | large                 | large   |

use serde::{Deserialize, Serialize};

use crate::answers::{Answer, Answers, LivingSpaces, RoomSize};
use crate::config::{AreaPresets, StairsPreset};
use crate::units::SquareMetres;

/// Homes with this many bedrooms are assumed to have at least two living
/// areas and a large hallway
const LARGE_HOME_BEDROOMS: u32 = 4;

/// Room values the estimate was actually based on, after inference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomAssumptions {
    pub living_count: u8,
    pub living_size: RoomSize,
    /// `None` when the kitchen is not included
    pub kitchen_size: Option<RoomSize>,
}

/// Area contributions per room category, before wastage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaTakeoff {
    /// Bedrooms including one walk-in-robe allowance each
    pub bedrooms: SquareMetres,
    pub living: SquareMetres,
    pub kitchen: SquareMetres,
    pub hallway: SquareMetres,
    pub stairs: StairsPreset,
    pub assumptions: RoomAssumptions,
}

impl AreaTakeoff {
    /// Sum of every room category
    pub fn base_area(&self) -> SquareMetres {
        [
            self.bedrooms,
            self.living,
            self.kitchen,
            self.hallway,
            SquareMetres(self.stairs.area),
        ]
        .into_iter()
        .sum()
    }
}

/// Living space count, inferred when unspecified, then raised to two for
/// large homes that answered one.
pub fn living_count(bedrooms: u32, answer: Answer<LivingSpaces>) -> u8 {
    let count = answer.explicit().map(LivingSpaces::count).unwrap_or(match bedrooms {
        0..=2 => 1,
        _ => 2,
    });

    if bedrooms >= LARGE_HOME_BEDROOMS && count == 1 {
        2
    } else {
        count
    }
}

/// Room size implied by the bedroom count (used for living spaces and kitchens)
pub fn inferred_room_size(bedrooms: u32) -> RoomSize {
    match bedrooms {
        0..=2 => RoomSize::Small,
        3 => RoomSize::Medium,
        _ => RoomSize::Large,
    }
}

/// Measure up every room category for one questionnaire.
pub fn take_off(answers: &Answers, presets: &AreaPresets) -> AreaTakeoff {
    let bedrooms_count = answers.bedrooms_count;
    let rooms = f64::from(bedrooms_count);
    let bedrooms = presets.bedroom.area(answers.bedroom_size) * rooms
        + SquareMetres(presets.bedroom.walk_in_robe) * rooms;

    let living_count = living_count(bedrooms_count, answers.living_count);
    let living_size = answers.living_size.or_infer(|| inferred_room_size(bedrooms_count));
    let living = presets.living.area(living_size) * f64::from(living_count);

    let kitchen_size = answers
        .include_kitchen
        .then(|| answers.kitchen_size.or_infer(|| inferred_room_size(bedrooms_count)));
    let kitchen = kitchen_size
        .map(|size| presets.kitchen.area(size))
        .unwrap_or(SquareMetres::ZERO);

    let hallway = match (answers.include_hallways, bedrooms_count >= LARGE_HOME_BEDROOMS) {
        (false, _) => SquareMetres::ZERO,
        (true, false) => SquareMetres(presets.hallway.small),
        (true, true) => SquareMetres(presets.hallway.large),
    };

    AreaTakeoff {
        bedrooms,
        living,
        kitchen,
        hallway,
        stairs: presets.stairs.get(answers.stairs_band),
        assumptions: RoomAssumptions {
            living_count,
            living_size,
            kitchen_size,
        },
    }
}
