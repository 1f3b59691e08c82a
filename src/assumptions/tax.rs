//! Income tax assumptions applied to interest and dividends

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Default withholding rate on interest income (15.4%)
pub const DEFAULT_INTEREST_TAX_RATE: f64 = 0.154;

/// Default withholding rate on dividend income (15.4%)
pub const DEFAULT_DIVIDEND_TAX_RATE: f64 = 0.154;

/// Tax rates withheld at source, as decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxAssumptions {
    /// Rate withheld from savings interest and (when enabled) bond coupons
    #[serde(default = "default_interest_tax_rate")]
    pub interest_income_tax_rate: f64,

    /// Rate withheld from cash dividends
    #[serde(default = "default_dividend_tax_rate")]
    pub dividend_income_tax_rate: f64,
}

fn default_interest_tax_rate() -> f64 { DEFAULT_INTEREST_TAX_RATE }
fn default_dividend_tax_rate() -> f64 { DEFAULT_DIVIDEND_TAX_RATE }

impl Default for TaxAssumptions {
    fn default() -> Self {
        Self {
            interest_income_tax_rate: DEFAULT_INTEREST_TAX_RATE,
            dividend_income_tax_rate: DEFAULT_DIVIDEND_TAX_RATE,
        }
    }
}

impl TaxAssumptions {
    /// Tax-exempt assumptions, useful for gross comparisons
    pub fn exempt() -> Self {
        Self {
            interest_income_tax_rate: 0.0,
            dividend_income_tax_rate: 0.0,
        }
    }

    /// Both rates must be finite fractions in [0, 1]
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("tax.interest_income_tax_rate", self.interest_income_tax_rate),
            ("tax.dividend_income_tax_rate", self.dividend_income_tax_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidRate { field, value });
            }
        }
        Ok(())
    }

    /// Share of interest kept after withholding
    pub fn interest_retention(&self) -> f64 {
        1.0 - self.interest_income_tax_rate
    }
}
