//! Fixed-coupon bond descriptor

use crate::error::{non_negative_rate, positive_amount, ValidationError};
use serde::{Deserialize, Serialize};

/// Longest coupon schedule accepted (100 years of daily coupons fit)
pub const MAX_COUPON_PERIODS: i32 = 100_000;

/// Raw bond parameters as entered, before validation
///
/// Rates are decimals here (5% coupon -> 0.05).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    pub face_value: f64,
    pub purchase_price: f64,
    /// Annual coupon rate (decimal)
    pub coupon_rate: f64,
    pub years_to_maturity: f64,
    /// Coupon payments per year (1, 2, 4, ...)
    pub coupon_frequency: u32,
    /// One-way trading fee on the purchase (decimal)
    #[serde(default)]
    pub trading_fee_rate: f64,
    /// Withhold interest income tax from every coupon
    #[serde(default)]
    pub apply_tax: bool,
}

/// Validated, immutable bond
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "BondTerms")]
pub struct Bond {
    face_value: f64,
    purchase_price: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
    coupon_frequency: u32,
    coupon_periods: i32,
    trading_fee_rate: f64,
    apply_tax: bool,
}

impl Bond {
    pub fn new(terms: BondTerms) -> Result<Self, ValidationError> {
        let face_value = positive_amount("face_value", terms.face_value)?;
        let purchase_price = positive_amount("purchase_price", terms.purchase_price)?;
        let coupon_rate = non_negative_rate("coupon_rate", terms.coupon_rate)?;
        let trading_fee_rate = non_negative_rate("trading_fee_rate", terms.trading_fee_rate)?;

        if !(terms.years_to_maturity >= 0.0 && terms.years_to_maturity.is_finite()) {
            return Err(ValidationError::InvalidPeriod {
                field: "years_to_maturity",
                value: terms.years_to_maturity,
            });
        }
        if terms.coupon_frequency == 0 {
            return Err(ValidationError::InvalidPeriod {
                field: "coupon_frequency",
                value: 0.0,
            });
        }

        let periods = (terms.years_to_maturity * terms.coupon_frequency as f64).floor();
        let coupon_periods = i32::try_from(periods as i64)
            .ok()
            .filter(|&p| p <= MAX_COUPON_PERIODS)
            .ok_or(ValidationError::InvalidPeriod { field: "coupon_periods", value: periods })?;

        Ok(Self {
            face_value,
            purchase_price,
            coupon_rate,
            years_to_maturity: terms.years_to_maturity,
            coupon_frequency: terms.coupon_frequency,
            coupon_periods,
            trading_fee_rate,
            apply_tax: terms.apply_tax,
        })
    }

    pub fn face_value(&self) -> f64 { self.face_value }
    pub fn purchase_price(&self) -> f64 { self.purchase_price }
    pub fn coupon_rate(&self) -> f64 { self.coupon_rate }
    pub fn years_to_maturity(&self) -> f64 { self.years_to_maturity }
    pub fn coupon_frequency(&self) -> u32 { self.coupon_frequency }
    pub fn trading_fee_rate(&self) -> f64 { self.trading_fee_rate }
    pub fn apply_tax(&self) -> bool { self.apply_tax }

    /// Purchase price grossed up by the trading fee
    pub fn acquisition_cost(&self) -> f64 {
        self.purchase_price * (1.0 + self.trading_fee_rate)
    }

    /// Number of remaining coupon periods, truncated (2.9 periods -> 2)
    pub fn coupon_periods(&self) -> i32 {
        self.coupon_periods
    }
}

impl TryFrom<BondTerms> for Bond {
    type Error = ValidationError;

    fn try_from(terms: BondTerms) -> Result<Self, Self::Error> {
        Self::new(terms)
    }
}
