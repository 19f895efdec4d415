//! # Questionnaire Answers
//!
//! Everything the customer tells us about the job. Every answer is a closed
//! enumeration, so a value outside the questionnaire's options cannot be
//! constructed (or deserialized) in the first place.
//!
//! Questions the customer may skip are wrapped in [`Answer`], which is either
//! an explicit choice or [`Answer::Unspecified`]. In JSON the unspecified
//! case is the string `"not_sure"`.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "product": "HybridPlus",
//!   "bedrooms_count": 4,
//!   "bedroom_size": "large",
//!   "living_count": "not_sure",
//!   "living_size": "not_sure",
//!   "include_kitchen": true,
//!   "kitchen_size": "medium",
//!   "include_hallways": true,
//!   "stairs_band": "15_17",
//!   "floor_evenness": "little_uneven",
//!   "current_flooring": ["carpet", "tiles"],
//!   "finish_type": "not_sure",
//!   "contact": {
//!     "name": "Sam",
//!     "suburb": "Fitzroy",
//!     "mobile": "0400 000 000",
//!     "email": "sam@example.com"
//!   }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use floor_core::answers::{Answer, Answers, LivingSpaces, RoomSize};
//!
//! let answers = Answers {
//!     bedrooms_count: 4,
//!     living_count: Answer::Unspecified,
//!     living_size: Answer::Explicit(RoomSize::Large),
//!     ..Answers::default()
//! };
//! assert!(answers.living_count.is_unspecified());
//! assert!(LivingSpaces::new(4).is_err());
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::{EstimateError, EstimateResult};

/// JSON spelling of an unspecified answer
pub const NOT_SURE: &str = "not_sure";

// ============================================================================
// Answer<T>
// ============================================================================

/// An answer the customer may decline to give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer<T> {
    /// The customer picked a concrete option
    Explicit(T),
    /// The customer chose "Not sure"
    Unspecified,
}

impl<T: Copy> Answer<T> {
    /// The explicit value, if any
    pub fn explicit(&self) -> Option<T> {
        match self {
            Answer::Explicit(value) => Some(*value),
            Answer::Unspecified => None,
        }
    }

    /// Resolve to a concrete value, inferring one when unspecified
    pub fn or_infer(&self, infer: impl FnOnce() -> T) -> T {
        self.explicit().unwrap_or_else(infer)
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Answer::Unspecified)
    }
}

impl<T: Choice> Answer<T> {
    /// Short key for the answer: the option's code, or `not_sure`
    pub fn code(&self) -> &'static str {
        match self {
            Answer::Explicit(value) => value.code(),
            Answer::Unspecified => NOT_SURE,
        }
    }
}

impl<T> From<T> for Answer<T> {
    fn from(value: T) -> Self {
        Answer::Explicit(value)
    }
}

impl<T: FromStr<Err = EstimateError>> FromStr for Answer<T> {
    type Err = EstimateError;

    fn from_str(s: &str) -> EstimateResult<Self> {
        match normalize(s).as_str() {
            "NOT-SURE" | "NOTSURE" | "UNSURE" | "?" => Ok(Answer::Unspecified),
            _ => s.parse().map(Answer::Explicit),
        }
    }
}

impl<T: Serialize> Serialize for Answer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Answer::Explicit(value) => value.serialize(serializer),
            Answer::Unspecified => serializer.serialize_str(NOT_SURE),
        }
    }
}

// `"not_sure"` first, then the inner type, whose own error is passed through
impl<'de, T: DeserializeOwned> Deserialize<'de> for Answer<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.as_str() == Some(NOT_SURE) {
            return Ok(Answer::Unspecified);
        }
        T::deserialize(value).map(Answer::Explicit).map_err(D::Error::custom)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_uppercase().replace([' ', '_'], "-")
}

// ============================================================================
// Options
// ============================================================================

/// A questionnaire question with a fixed set of options.
pub trait Choice: Copy + FromStr<Err = EstimateError> + 'static {
    /// Every option, in questionnaire order
    fn options() -> &'static [Self];

    /// Short key that `from_str_flexible` accepts back
    fn code(&self) -> &'static str;
}

/// Display, FromStr and [`Choice`] for the option enums, delegating to their
/// inherent `ALL`, `code`, `display_name` and `from_str_flexible`
macro_rules! impl_choice {
    ($type:ty) => {
        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.display_name())
            }
        }

        impl FromStr for $type {
            type Err = EstimateError;
            fn from_str(s: &str) -> EstimateResult<Self> {
                <$type>::from_str_flexible(s)
            }
        }

        impl Choice for $type {
            fn options() -> &'static [Self] {
                &<$type>::ALL
            }

            fn code(&self) -> &'static str {
                <$type>::code(self)
            }
        }
    };
}

/// Flooring product line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// 8mm hybrid
    #[serde(rename = "8H")]
    EightH,
    /// 10mm hybrid for high-traffic homes
    HybridPlus,
    /// Acoustic underlay hybrid
    CloudStep,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::EightH,
        ProductType::HybridPlus,
        ProductType::CloudStep,
    ];

    /// Product code, same as the JSON spelling
    pub fn code(&self) -> &'static str {
        match self {
            ProductType::EightH => "8H",
            ProductType::HybridPlus => "HybridPlus",
            ProductType::CloudStep => "CloudStep",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::EightH => "8H Hybrid (8mm)",
            ProductType::HybridPlus => "Hybrid Plus (10mm)",
            ProductType::CloudStep => "CloudStep Acoustic",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match normalize(s).as_str() {
            "8H" | "8MM" | "8H-HYBRID" | "8H-HYBRID-(8MM)" => Ok(ProductType::EightH),
            "HYBRIDPLUS" | "HYBRID-PLUS" | "10MM" | "HYBRID-PLUS-(10MM)" => {
                Ok(ProductType::HybridPlus)
            }
            "CLOUDSTEP" | "CLOUD-STEP" | "ACOUSTIC" | "CLOUDSTEP-ACOUSTIC" => {
                Ok(ProductType::CloudStep)
            }
            _ => Err(EstimateError::invalid_input(
                "product",
                s,
                "Expected 8H, HybridPlus or CloudStep",
            )),
        }
    }
}

impl_choice!(ProductType);

/// Qualitative room size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSize {
    Small,
    Medium,
    Large,
}

impl RoomSize {
    pub const ALL: [RoomSize; 3] = [RoomSize::Small, RoomSize::Medium, RoomSize::Large];

    pub fn code(&self) -> &'static str {
        match self {
            RoomSize::Small => "small",
            RoomSize::Medium => "medium",
            RoomSize::Large => "large",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoomSize::Small => "Small",
            RoomSize::Medium => "Medium",
            RoomSize::Large => "Large",
        }
    }

    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match normalize(s).as_str() {
            "SMALL" | "S" => Ok(RoomSize::Small),
            "MEDIUM" | "M" => Ok(RoomSize::Medium),
            "LARGE" | "L" => Ok(RoomSize::Large),
            _ => Err(EstimateError::invalid_input(
                "room_size",
                s,
                "Expected small, medium or large",
            )),
        }
    }
}

impl_choice!(RoomSize);

/// Number of living spaces, 0 to 3. Zero covers a job with no living
/// areas at all (bedrooms or stairs only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LivingSpaces(u8);

impl LivingSpaces {
    pub const MAX: u8 = 3;

    pub const ALL: [LivingSpaces; 4] = [
        LivingSpaces(0),
        LivingSpaces(1),
        LivingSpaces(2),
        LivingSpaces(3),
    ];

    pub fn new(count: u8) -> EstimateResult<Self> {
        if count <= Self::MAX {
            Ok(LivingSpaces(count))
        } else {
            Err(EstimateError::invalid_input(
                "living_count",
                count.to_string(),
                "Living spaces must be between 0 and 3",
            ))
        }
    }

    pub fn count(self) -> u8 {
        self.0
    }

    pub fn code(&self) -> &'static str {
        match self.0 {
            0 => "none",
            1 => "1",
            2 => "2",
            _ => "3+",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self.0 {
            0 => "None",
            1 => "1",
            2 => "2",
            _ => "3+",
        }
    }

    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        let trimmed = s.trim().trim_end_matches('+');
        if trimmed.eq_ignore_ascii_case("none") {
            return Self::new(0);
        }
        let count: u8 = trimmed.parse().map_err(|_| {
            EstimateError::invalid_input("living_count", s, "Expected none, 1, 2 or 3")
        })?;
        Self::new(count)
    }
}

impl TryFrom<u8> for LivingSpaces {
    type Error = EstimateError;
    fn try_from(count: u8) -> EstimateResult<Self> {
        Self::new(count)
    }
}

impl From<LivingSpaces> for u8 {
    fn from(spaces: LivingSpaces) -> u8 {
        spaces.0
    }
}

impl_choice!(LivingSpaces);

/// Approximate number of steps, asked as a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StairsBand {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "12_14")]
    Steps12To14,
    #[serde(rename = "15_17")]
    Steps15To17,
    #[serde(rename = "18_20")]
    Steps18To20,
    #[serde(rename = "20_plus")]
    Steps20Plus,
}

impl StairsBand {
    pub const ALL: [StairsBand; 5] = [
        StairsBand::None,
        StairsBand::Steps12To14,
        StairsBand::Steps15To17,
        StairsBand::Steps18To20,
        StairsBand::Steps20Plus,
    ];

    /// Band key, same as the JSON spelling
    pub fn code(&self) -> &'static str {
        match self {
            StairsBand::None => "none",
            StairsBand::Steps12To14 => "12_14",
            StairsBand::Steps15To17 => "15_17",
            StairsBand::Steps18To20 => "18_20",
            StairsBand::Steps20Plus => "20_plus",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StairsBand::None => "No stairs",
            StairsBand::Steps12To14 => "About 12-14 steps",
            StairsBand::Steps15To17 => "About 15-17 steps",
            StairsBand::Steps18To20 => "About 18-20 steps",
            StairsBand::Steps20Plus => "More than 20 steps",
        }
    }

    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match normalize(s).as_str() {
            "NONE" | "NO" | "0" | "NO-STAIRS" => Ok(StairsBand::None),
            "12-14" | "ABOUT-12-14-STEPS" => Ok(StairsBand::Steps12To14),
            "15-17" | "ABOUT-15-17-STEPS" => Ok(StairsBand::Steps15To17),
            "18-20" | "ABOUT-18-20-STEPS" => Ok(StairsBand::Steps18To20),
            "20-PLUS" | "20+" | "MORE-THAN-20-STEPS" => Ok(StairsBand::Steps20Plus),
            _ => Err(EstimateError::invalid_input(
                "stairs_band",
                s,
                "Expected none, 12_14, 15_17, 18_20 or 20_plus",
            )),
        }
    }
}

impl_choice!(StairsBand);

/// How flat the existing subfloor is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorEvenness {
    MostlyEven,
    LittleUneven,
    VeryUneven,
    NotSure,
}

impl FloorEvenness {
    pub const ALL: [FloorEvenness; 4] = [
        FloorEvenness::MostlyEven,
        FloorEvenness::LittleUneven,
        FloorEvenness::VeryUneven,
        FloorEvenness::NotSure,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FloorEvenness::MostlyEven => "mostly_even",
            FloorEvenness::LittleUneven => "little_uneven",
            FloorEvenness::VeryUneven => "very_uneven",
            FloorEvenness::NotSure => NOT_SURE,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FloorEvenness::MostlyEven => "Mostly even",
            FloorEvenness::LittleUneven => "A little uneven",
            FloorEvenness::VeryUneven => "Very uneven",
            FloorEvenness::NotSure => "Not sure",
        }
    }

    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match normalize(s).as_str() {
            "MOSTLY-EVEN" | "EVEN" => Ok(FloorEvenness::MostlyEven),
            "LITTLE-UNEVEN" | "A-LITTLE-UNEVEN" | "SLIGHTLY-UNEVEN" => {
                Ok(FloorEvenness::LittleUneven)
            }
            "VERY-UNEVEN" | "UNEVEN" => Ok(FloorEvenness::VeryUneven),
            "NOT-SURE" | "NOTSURE" | "?" => Ok(FloorEvenness::NotSure),
            _ => Err(EstimateError::invalid_input(
                "floor_evenness",
                s,
                "Expected mostly_even, little_uneven, very_uneven or not_sure",
            )),
        }
    }
}

impl_choice!(FloorEvenness);

/// Existing floor covering that has to come up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlooringType {
    Carpet,
    Tiles,
    Floorboards,
    Concrete,
    /// The customer doesn't know what is down there
    NotSure,
}

impl FlooringType {
    pub const ALL: [FlooringType; 5] = [
        FlooringType::Carpet,
        FlooringType::Tiles,
        FlooringType::Floorboards,
        FlooringType::Concrete,
        FlooringType::NotSure,
    ];

    /// A concrete covering type, as opposed to the "not sure" marker
    pub fn is_known(&self) -> bool {
        !matches!(self, FlooringType::NotSure)
    }

    /// Removing this covering produces enough debris to need a skip bin
    pub fn needs_skip_bin(&self) -> bool {
        matches!(
            self,
            FlooringType::Tiles | FlooringType::Floorboards | FlooringType::NotSure
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            FlooringType::Carpet => "carpet",
            FlooringType::Tiles => "tiles",
            FlooringType::Floorboards => "floorboards",
            FlooringType::Concrete => "concrete",
            FlooringType::NotSure => NOT_SURE,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FlooringType::Carpet => "Carpet",
            FlooringType::Tiles => "Tiles",
            FlooringType::Floorboards => "Floorboards",
            FlooringType::Concrete => "Concrete",
            FlooringType::NotSure => "Not sure",
        }
    }

    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match normalize(s).as_str() {
            "CARPET" => Ok(FlooringType::Carpet),
            "TILES" | "TILE" => Ok(FlooringType::Tiles),
            "FLOORBOARDS" | "FLOORBOARD" | "BOARDS" | "TIMBER" => Ok(FlooringType::Floorboards),
            "CONCRETE" | "SLAB" => Ok(FlooringType::Concrete),
            "NOT-SURE" | "NOTSURE" | "?" => Ok(FlooringType::NotSure),
            _ => Err(EstimateError::invalid_input(
                "current_flooring",
                s,
                "Expected carpet, tiles, floorboards, concrete or not_sure",
            )),
        }
    }
}

impl_choice!(FlooringType);

/// Edge finish where the new floor meets the walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishType {
    Scotia,
    Skirting,
}

impl FinishType {
    pub const ALL: [FinishType; 2] = [FinishType::Scotia, FinishType::Skirting];

    pub fn code(&self) -> &'static str {
        match self {
            FinishType::Scotia => "scotia",
            FinishType::Skirting => "skirting",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FinishType::Scotia => "Scotia",
            FinishType::Skirting => "Skirting replacement",
        }
    }

    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match normalize(s).as_str() {
            "SCOTIA" => Ok(FinishType::Scotia),
            "SKIRTING" | "SKIRTING-REPLACEMENT" => Ok(FinishType::Skirting),
            _ => Err(EstimateError::invalid_input(
                "finish_type",
                s,
                "Expected scotia, skirting or not_sure",
            )),
        }
    }
}

impl_choice!(FinishType);

// ============================================================================
// Contact details
// ============================================================================

/// Lead contact fields. Collected by the questionnaire, never read by the
/// estimator. Missing JSON fields are left blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub name: String,
    pub suburb: String,
    pub mobile: String,
    pub email: String,
}

impl ContactDetails {
    pub fn new(
        name: impl Into<String>,
        suburb: impl Into<String>,
        mobile: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        ContactDetails {
            name: name.into(),
            suburb: suburb.into(),
            mobile: mobile.into(),
            email: email.into(),
        }
    }

    /// Names of every blank field, in questionnaire order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("suburb", &self.suburb),
            ("mobile", &self.mobile),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Every field must be non-empty after trimming. No format checks.
    pub fn validate(&self) -> EstimateResult<()> {
        match self.missing_fields().first() {
            Some(field) => Err(EstimateError::missing_field(*field)),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Answers
// ============================================================================

/// One completed questionnaire.
///
/// Missing JSON fields fall back to the questionnaire's starting answers
/// (see [`Answers::default`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Answers {
    pub product: ProductType,
    pub bedrooms_count: u32,
    pub bedroom_size: RoomSize,
    pub living_count: Answer<LivingSpaces>,
    pub living_size: Answer<RoomSize>,
    pub include_kitchen: bool,
    pub kitchen_size: Answer<RoomSize>,
    pub include_hallways: bool,
    pub stairs_band: StairsBand,
    pub floor_evenness: FloorEvenness,
    pub current_flooring: BTreeSet<FlooringType>,
    pub finish_type: Answer<FinishType>,
    pub contact: ContactDetails,
}

impl Default for Answers {
    fn default() -> Self {
        Answers {
            product: ProductType::HybridPlus,
            bedrooms_count: 3,
            bedroom_size: RoomSize::Medium,
            living_count: Answer::Explicit(LivingSpaces(2)),
            living_size: Answer::Explicit(RoomSize::Medium),
            include_kitchen: true,
            kitchen_size: Answer::Explicit(RoomSize::Medium),
            include_hallways: true,
            stairs_band: StairsBand::None,
            floor_evenness: FloorEvenness::MostlyEven,
            current_flooring: BTreeSet::new(),
            finish_type: Answer::Explicit(FinishType::Scotia),
            contact: ContactDetails::default(),
        }
    }
}

impl Answers {
    /// Selected covering types, excluding the "not sure" marker
    pub fn known_flooring(&self) -> impl Iterator<Item = FlooringType> + '_ {
        self.current_flooring.iter().copied().filter(FlooringType::is_known)
    }

    /// Only the "not sure" marker was ticked
    pub fn flooring_unknown(&self) -> bool {
        self.known_flooring().next().is_none()
            && self.current_flooring.contains(&FlooringType::NotSure)
    }
}
