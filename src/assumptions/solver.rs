//! Bisection settings for the yield-to-maturity solver

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Search bracket, tolerance and iteration budget for the YTM bisection
///
/// The defaults reproduce the reference results: yields are searched in
/// [0%, 100%] with an absolute price tolerance of 0.0001 currency units and
/// at most 100 halvings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldSolverConfig {
    /// Lowest annual yield tried (decimal)
    #[serde(default)]
    pub lower_bound: f64,

    /// Highest annual yield tried (decimal)
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,

    /// Absolute tolerance on |price(y) - cost|, in currency units
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum number of bisection steps
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_upper_bound() -> f64 { 1.0 }
fn default_tolerance() -> f64 { 1e-4 }
fn default_max_iterations() -> u32 { 100 }

impl Default for YieldSolverConfig {
    fn default() -> Self {
        Self {
            lower_bound: 0.0,
            upper_bound: 1.0,
            tolerance: 1e-4,
            max_iterations: 100,
        }
    }
}

impl YieldSolverConfig {
    /// Reject brackets and budgets the bisection cannot work with
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.lower_bound.is_finite() && self.upper_bound.is_finite()) {
            let value = if self.lower_bound.is_finite() { self.upper_bound } else { self.lower_bound };
            return Err(ValidationError::InvalidRate { field: "solver.bounds", value });
        }
        if self.lower_bound >= self.upper_bound {
            return Err(ValidationError::InvalidRate {
                field: "solver.bounds",
                value: self.lower_bound,
            });
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(ValidationError::InvalidRate {
                field: "solver.tolerance",
                value: self.tolerance,
            });
        }
        if self.max_iterations == 0 {
            return Err(ValidationError::InvalidPeriod {
                field: "solver.max_iterations",
                value: 0.0,
            });
        }
        Ok(())
    }
}
