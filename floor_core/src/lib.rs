//! # floor_core - Flooring Estimate Engine
//!
//! `floor_core` turns a short questionnaire about a home (bedrooms, living
//! spaces, stairs, existing floors, finish) into an area and a min/max cost
//! range for supplying and installing new flooring.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: [`estimate`] is a pure function of answers and rates
//! - **Closed inputs**: every answer is an enum, "not sure" is explicit
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types at the edges (config, contact)
//!
//! ## Quick Start
//!
//! ```rust
//! use floor_core::{estimate, Answers, DEFAULT_CONFIG};
//! use floor_core::report::render_headline;
//!
//! let result = estimate(&Answers::default(), &DEFAULT_CONFIG);
//! println!("{}", render_headline(&result));
//! ```
//!
//! ## Modules
//!
//! - [`answers`] - Questionnaire answers and contact details
//! - [`config`] - Rate table and its invariants
//! - [`estimate`] - The estimator: area take-off and cost lines
//! - [`report`] - Plain-text rendering of a result
//! - [`quote`] - Submitted questionnaire + estimate record
//! - [`units`] - Area and `{min, max}` range types
//! - [`errors`] - Structured error types
//! - [`file_io`] - Loading rate tables and answers from JSON

pub mod answers;
pub mod config;
pub mod errors;
pub mod estimate;
pub mod file_io;
pub mod quote;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use answers::{Answer, Answers, ContactDetails};
pub use config::{EstimatorConfig, DEFAULT_CONFIG};
pub use errors::{EstimateError, EstimateResult};
pub use estimate::{estimate, CalculationResult, CostBreakdown};
pub use file_io::{load_answers, load_config};
pub use quote::Quote;
