//! Calculation assumptions: withholding taxes and solver settings
//!
//! Everything that varies by jurisdiction or by taste lives here instead of
//! being baked into the engines. `Assumptions::default()` reproduces the
//! reference numbers.

mod solver;
mod tax;

pub use solver::YieldSolverConfig;
pub use tax::{TaxAssumptions, DEFAULT_DIVIDEND_TAX_RATE, DEFAULT_INTEREST_TAX_RATE};

use crate::error::{AnalyzerError, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Combined assumption set handed to the calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    #[serde(default)]
    pub tax: TaxAssumptions,

    #[serde(default)]
    pub solver: YieldSolverConfig,
}

impl Assumptions {
    /// Check tax rates and solver settings
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.tax.validate()?;
        self.solver.validate()
    }

    /// Parse and validate assumptions from a JSON string; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let assumptions: Self = serde_json::from_str(json)?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Load assumptions from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let assumptions = Self::from_json_str(&text)?;
        log::debug!("Loaded assumptions from {}: {:?}", path.display(), assumptions);
        Ok(assumptions)
    }
}
