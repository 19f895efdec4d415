//! # Quote Record
//!
//! A `Quote` is what the questionnaire hands over once the customer submits:
//! their answers (including contact details), the estimate, and a small
//! header identifying it.
//!
//! ## Structure
//!
//! ```text
//! Quote
//! ├── meta: QuoteMetadata (id, schema version, created timestamp)
//! ├── answers: Answers (incl. contact details)
//! └── result: CalculationResult
//! ```
//!
//! ## Example
//!
//! ```rust
//! use floor_core::answers::{Answers, ContactDetails};
//! use floor_core::config::DEFAULT_CONFIG;
//! use floor_core::quote::Quote;
//!
//! let mut answers = Answers::default();
//! assert!(Quote::prepare(answers.clone(), &DEFAULT_CONFIG).is_err());
//!
//! answers.contact = ContactDetails::new("Sam", "Fitzroy", "0400 000 000", "sam@example.com");
//! let quote = Quote::prepare(answers, &DEFAULT_CONFIG).unwrap();
//! assert_eq!(quote.result.rounded_area, 127);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::answers::Answers;
use crate::config::EstimatorConfig;
use crate::errors::EstimateResult;
use crate::estimate::{estimate, CalculationResult};

/// Current schema version for serialized quotes
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Submitted questionnaire plus its estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub meta: QuoteMetadata,
    pub answers: Answers,
    pub result: CalculationResult,
}

impl Quote {
    /// Validate contact details, then estimate.
    ///
    /// # Returns
    ///
    /// * `Ok(Quote)` - contact details present, estimate attached
    /// * `Err(EstimateError::MissingField)` - first blank contact field
    pub fn prepare(answers: Answers, config: &EstimatorConfig) -> EstimateResult<Self> {
        answers.contact.validate()?;

        let result = estimate(&answers, config);
        let quote = Quote {
            meta: QuoteMetadata::new(),
            answers,
            result,
        };

        info!(
            quote_id = %quote.meta.id,
            suburb = %quote.answers.contact.suburb,
            area = quote.result.rounded_area,
            total_min = quote.result.total.min,
            total_max = quote.result.total.max,
            "quote prepared"
        );
        Ok(quote)
    }
}

/// Quote header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteMetadata {
    /// Unique quote id
    pub id: Uuid,

    /// Schema version (for consumers that store quotes)
    pub version: String,

    /// When the estimate was produced
    pub created: DateTime<Utc>,
}

impl QuoteMetadata {
    /// Fresh id, stamped now
    fn new() -> Self {
        QuoteMetadata {
            id: Uuid::new_v4(),
            version: SCHEMA_VERSION.to_string(),
            created: Utc::now(),
        }
    }
}
