//! Dividend stock round trip: buy, collect dividends, sell

use crate::error::{non_negative_amount, non_negative_rate, positive_amount, ValidationError};
use serde::{Deserialize, Serialize};

/// Raw round-trip parameters; fee and tax rates are percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendStockTerms {
    pub purchase_price_per_share: f64,
    pub selling_price_per_share: f64,
    pub number_of_shares: u32,
    /// Pre-tax dividends collected over the holding period
    #[serde(default)]
    pub total_dividend_received: f64,
    /// One-way brokerage fee in percent (0.015 means 0.015%)
    #[serde(default)]
    pub trading_fee_pct: f64,
    /// Securities transaction tax on the sale, in percent
    #[serde(default)]
    pub transaction_tax_pct: f64,
}

/// Validated dividend stock position with rates stored as decimals
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "DividendStockTerms")]
pub struct DividendStock {
    purchase_price_per_share: f64,
    selling_price_per_share: f64,
    number_of_shares: u32,
    total_dividend_received: f64,
    trading_fee_rate: f64,
    securities_transaction_tax_rate: f64,
}

impl DividendStock {
    pub fn new(terms: DividendStockTerms) -> Result<Self, ValidationError> {
        if terms.number_of_shares == 0 {
            return Err(ValidationError::InvalidAmount { field: "number_of_shares", value: 0.0 });
        }
        Ok(Self {
            purchase_price_per_share: positive_amount(
                "purchase_price_per_share",
                terms.purchase_price_per_share,
            )?,
            selling_price_per_share: positive_amount(
                "selling_price_per_share",
                terms.selling_price_per_share,
            )?,
            number_of_shares: terms.number_of_shares,
            total_dividend_received: non_negative_amount(
                "total_dividend_received",
                terms.total_dividend_received,
            )?,
            trading_fee_rate: non_negative_rate("trading_fee", terms.trading_fee_pct)? / 100.0,
            securities_transaction_tax_rate: non_negative_rate(
                "transaction_tax",
                terms.transaction_tax_pct,
            )? / 100.0,
        })
    }

    pub fn purchase_price_per_share(&self) -> f64 { self.purchase_price_per_share }
    pub fn selling_price_per_share(&self) -> f64 { self.selling_price_per_share }
    pub fn number_of_shares(&self) -> u32 { self.number_of_shares }
    pub fn total_dividend_received(&self) -> f64 { self.total_dividend_received }

    /// Brokerage fee as a decimal
    pub fn trading_fee_rate(&self) -> f64 { self.trading_fee_rate }

    /// Transaction tax as a decimal
    pub fn securities_transaction_tax_rate(&self) -> f64 { self.securities_transaction_tax_rate }
}

impl TryFrom<DividendStockTerms> for DividendStock {
    type Error = ValidationError;

    fn try_from(terms: DividendStockTerms) -> Result<Self, Self::Error> {
        Self::new(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms() -> DividendStockTerms {
        DividendStockTerms {
            purchase_price_per_share: 10_000.0,
            selling_price_per_share: 12_000.0,
            number_of_shares: 100,
            total_dividend_received: 50_000.0,
            trading_fee_pct: 0.015,
            transaction_tax_pct: 0.23,
        }
    }

    #[test]
    fn test_percent_inputs_normalized() {
        let stock = DividendStock::new(terms()).expect("valid stock");
        assert!((stock.trading_fee_rate() - 0.00015).abs() < 1e-15);
        assert!((stock.securities_transaction_tax_rate() - 0.0023).abs() < 1e-15);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            DividendStock::new(DividendStockTerms { number_of_shares: 0, ..terms() }),
            Err(ValidationError::InvalidAmount { field: "number_of_shares", .. })
        ));
        assert!(matches!(
            DividendStock::new(DividendStockTerms { selling_price_per_share: -5.0, ..terms() }),
            Err(ValidationError::InvalidAmount { field: "selling_price_per_share", .. })
        ));
        assert!(matches!(
            DividendStock::new(DividendStockTerms { total_dividend_received: -1.0, ..terms() }),
            Err(ValidationError::InvalidAmount { field: "total_dividend_received", .. })
        ));
        assert!(matches!(
            DividendStock::new(DividendStockTerms { trading_fee_pct: -0.1, ..terms() }),
            Err(ValidationError::InvalidRate { field: "trading_fee", .. })
        ));
    }
}
