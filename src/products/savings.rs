//! Installment savings account with a tiered interest schedule

use crate::error::{positive_amount, ValidationError};
use serde::{Deserialize, Serialize};

/// Raw tier as entered: months and an annual rate in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierTerms {
    pub months: u32,
    /// Annual rate in percent (3.5 means 3.5%)
    pub annual_rate_pct: f64,
}

/// One contiguous block of months paying a single annual rate
///
/// Example: "first 6 months at 3.5% p.a." is `InterestRateTier::from_percent(6, 3.5)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "TierTerms")]
pub struct InterestRateTier {
    months: u32,
    /// Stored as a decimal (3.5% -> 0.035)
    annual_rate: f64,
}

impl InterestRateTier {
    /// Build a tier from a percentage rate
    pub fn from_percent(months: u32, annual_rate_pct: f64) -> Result<Self, ValidationError> {
        if months == 0 {
            return Err(ValidationError::InvalidPeriod { field: "tier.months", value: 0.0 });
        }
        if !annual_rate_pct.is_finite() {
            return Err(ValidationError::InvalidRate {
                field: "tier.annual_rate",
                value: annual_rate_pct,
            });
        }
        Ok(Self {
            months,
            annual_rate: annual_rate_pct / 100.0,
        })
    }

    pub fn months(&self) -> u32 { self.months }

    /// Annual rate as a decimal
    pub fn annual_rate(&self) -> f64 { self.annual_rate }
}

impl TryFrom<TierTerms> for InterestRateTier {
    type Error = ValidationError;

    fn try_from(terms: TierTerms) -> Result<Self, Self::Error> {
        Self::from_percent(terms.months, terms.annual_rate_pct)
    }
}

/// Raw account parameters as they appear in a JSON descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct SavingsTerms {
    pub monthly_deposit: f64,
    pub tiers: Vec<InterestRateTier>,
}

/// Monthly installment account paying simple interest per tier
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "SavingsTerms")]
pub struct TieredSavingsAccount {
    monthly_deposit: f64,
    tiers: Vec<InterestRateTier>,
    total_months: u32,
}

impl TieredSavingsAccount {
    pub fn new(monthly_deposit: f64, tiers: Vec<InterestRateTier>) -> Result<Self, ValidationError> {
        let monthly_deposit = positive_amount("monthly_deposit", monthly_deposit)?;
        if tiers.is_empty() {
            return Err(ValidationError::EmptySchedule);
        }

        // u32::MAX itself is refused: the yield annualization divides by total + 1
        let total_months = tiers
            .iter()
            .try_fold(0u32, |acc, tier| acc.checked_add(tier.months))
            .filter(|&total| total < u32::MAX)
            .ok_or_else(|| ValidationError::InvalidPeriod {
                field: "tiers.months",
                value: tiers.iter().map(|t| t.months as f64).sum(),
            })?;

        Ok(Self { monthly_deposit, tiers, total_months })
    }

    pub fn monthly_deposit(&self) -> f64 { self.monthly_deposit }

    /// Tiers in schedule order
    pub fn tiers(&self) -> &[InterestRateTier] { &self.tiers }

    /// Full term of the account: sum of all tier months
    pub fn total_months(&self) -> u32 {
        self.total_months
    }
}

impl TryFrom<SavingsTerms> for TieredSavingsAccount {
    type Error = ValidationError;

    fn try_from(terms: SavingsTerms) -> Result<Self, Self::Error> {
        Self::new(terms.monthly_deposit, terms.tiers)
    }
}
