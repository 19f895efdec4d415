//! # File I/O Module
//!
//! Loads a rate table or a set of questionnaire answers from JSON. Nothing is
//! ever written back: estimates are computed on demand.
//!
//! - Rate tables are validated after parsing, so a loaded config is always
//!   safe to estimate with
//! - Answers files may be partial; missing fields take the questionnaire's
//!   starting values
//!
//! ## Example
//!
//! ```rust,no_run
//! use floor_core::file_io::{load_answers, load_config};
//! use floor_core::estimate::estimate;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("rates.json"))?;
//! let answers = load_answers(Path::new("answers.json"))?;
//! let result = estimate(&answers, &config);
//! # Ok::<(), floor_core::errors::EstimateError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::answers::Answers;
use crate::config::EstimatorConfig;
use crate::errors::{EstimateError, EstimateResult};

/// Load and validate a rate table.
///
/// # Returns
///
/// * `Ok(EstimatorConfig)` - parsed and valid
/// * `Err(EstimateError::InvalidConfig)` - parsed but breaks an invariant
/// * `Err(EstimateError::SerializationError)` - invalid JSON
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_config(path: &Path) -> EstimateResult<EstimatorConfig> {
    let config: EstimatorConfig = load_json(path)?;
    config.validate()?;
    debug!(path = %path.display(), tiers = config.skip_bins.len(), "loaded rate table");
    Ok(config)
}

/// Load questionnaire answers.
pub fn load_answers(path: &Path) -> EstimateResult<Answers> {
    let answers: Answers = load_json(path)?;
    debug!(path = %path.display(), bedrooms = answers.bedrooms_count, "loaded answers");
    Ok(answers)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> EstimateResult<T> {
    let mut file = File::open(path).map_err(|e| {
        EstimateError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        EstimateError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}
