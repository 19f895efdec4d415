//! # Unit Types
//!
//! Lightweight wrappers for the quantities the estimator works with. They
//! serialize as plain numbers / `{min, max}` objects so JSON stays clean.
//!
//! ## Conventions
//!
//! - Area: square metres (m²)
//! - Money: dollars, kept as `f64` during calculation and rounded to whole
//!   dollars only when a result is produced
//! - Ranges: every rate and every cost line except material is a `{min, max}`
//!   pair ([`RateRange`] while calculating, [`CostRange`] once rounded)
//!
//! ## Example
//!
//! ```rust
//! use floor_core::units::{RateRange, SquareMetres};
//!
//! let area = SquareMetres(10.0) + SquareMetres(2.5);
//! let install = RateRange::new(30.0, 40.0).scale(area.value());
//! assert_eq!(install.round().min, 375);
//! assert_eq!(install.round().max, 500);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Mul};

// ============================================================================
// Area
// ============================================================================

/// Floor area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMetres(pub f64);

impl SquareMetres {
    /// Zero area
    pub const ZERO: SquareMetres = SquareMetres(0.0);

    /// Get the raw f64 value
    pub fn value(self) -> f64 {
        self.0
    }

    /// Round to the nearest whole square metre
    pub fn rounded(self) -> i64 {
        round_to_i64(self.0)
    }
}

impl Add for SquareMetres {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<f64> for SquareMetres {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for SquareMetres {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(SquareMetres::ZERO, Add::add)
    }
}

// ============================================================================
// Ranges
// ============================================================================

/// A `{min, max}` pair.
///
/// Used unrounded (`MinMax<f64>`) for rates and intermediate costs, and
/// rounded (`MinMax<i64>`) in results.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

/// Rate per unit (or an unrounded cost) as a `{min, max}` pair
pub type RateRange = MinMax<f64>;

/// Whole-dollar cost range as shown to the customer
pub type CostRange = MinMax<i64>;

impl<T> MinMax<T> {
    pub const fn new(min: T, max: T) -> Self {
        MinMax { min, max }
    }
}

impl<T: PartialOrd> MinMax<T> {
    /// `min <= max`
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl MinMax<f64> {
    /// Zero range
    pub const ZERO: RateRange = MinMax { min: 0.0, max: 0.0 };

    /// Same value on both sides
    pub const fn point(value: f64) -> Self {
        MinMax { min: value, max: value }
    }

    /// Multiply both bounds by a quantity (area, step count, ...)
    pub fn scale(self, quantity: f64) -> Self {
        MinMax {
            min: self.min * quantity,
            max: self.max * quantity,
        }
    }

    /// Round both bounds to the nearest whole unit
    pub fn round(self) -> CostRange {
        MinMax {
            min: round_to_i64(self.min),
            max: round_to_i64(self.max),
        }
    }
}

impl<T: Add<Output = T>> Add for MinMax<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        MinMax {
            min: self.min + rhs.min,
            max: self.max + rhs.max,
        }
    }
}

impl Sum for MinMax<f64> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(RateRange::ZERO, Add::add)
    }
}

/// Round half away from zero; all estimator outputs are non-negative
pub fn round_to_i64(value: f64) -> i64 {
    value.round() as i64
}
