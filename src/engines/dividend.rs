//! Realized return on a dividend stock round trip

use crate::assumptions::TaxAssumptions;
use crate::metrics::{names, MetricSet};
use crate::products::DividendStock;
use log::debug;

/// Cash legs of a buy / hold / sell round trip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividendRealization {
    pub purchase_amount: f64,
    pub purchase_fee: f64,
    pub total_investment: f64,
    pub selling_amount: f64,
    pub selling_fee: f64,
    pub transaction_tax: f64,
    pub dividend_tax: f64,
    pub net_dividend: f64,
    pub net_profit: f64,
    /// Net profit over total investment, in percent
    pub return_pct: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DividendStockEngine {
    tax: TaxAssumptions,
}

impl DividendStockEngine {
    pub fn new(tax: TaxAssumptions) -> Self {
        Self { tax }
    }

    pub fn realize(&self, stock: &DividendStock) -> DividendRealization {
        let shares = stock.number_of_shares() as f64;

        // Buy side: the fee is part of the capital at risk
        let purchase_amount = stock.purchase_price_per_share() * shares;
        let purchase_fee = purchase_amount * stock.trading_fee_rate();
        let total_investment = purchase_amount + purchase_fee;

        // Sell side: fee and transaction tax both come off the proceeds
        let selling_amount = stock.selling_price_per_share() * shares;
        let selling_fee = selling_amount * stock.trading_fee_rate();
        let transaction_tax = selling_amount * stock.securities_transaction_tax_rate();

        let dividend_tax = stock.total_dividend_received() * self.tax.dividend_income_tax_rate;
        let net_dividend = stock.total_dividend_received() - dividend_tax;

        let net_profit =
            (selling_amount - selling_fee - transaction_tax) + net_dividend - total_investment;
        let return_pct = net_profit / total_investment * 100.0;

        debug!("Dividend round trip: net profit {:.2}, return {:.4}%", net_profit, return_pct);

        DividendRealization {
            purchase_amount,
            purchase_fee,
            total_investment,
            selling_amount,
            selling_fee,
            transaction_tax,
            dividend_tax,
            net_dividend,
            net_profit,
            return_pct,
        }
    }

    pub fn evaluate(&self, stock: &DividendStock) -> MetricSet {
        let r = self.realize(stock);

        MetricSet::builder(names::DIVIDEND_STOCK_PRODUCT)
            .amount(names::TOTAL_INVESTMENT, r.total_investment)
            .amount(names::PURCHASE_AMOUNT, r.purchase_amount)
            .amount(names::PURCHASE_FEE, r.purchase_fee)
            .amount(names::SALE_AMOUNT, r.selling_amount)
            .amount(names::SALE_FEE, r.selling_fee)
            .amount(names::TRANSACTION_TAX, r.transaction_tax)
            .amount(names::PRE_TAX_DIVIDEND, stock.total_dividend_received())
            .amount(names::DIVIDEND_TAX, r.dividend_tax)
            .amount(names::POST_TAX_DIVIDEND, r.net_dividend)
            .amount(names::NET_PROFIT, r.net_profit)
            .percentage(names::REALIZED_RETURN, r.return_pct)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::DividendStockTerms;
    use approx::assert_relative_eq;

    fn reference_stock() -> DividendStock {
        DividendStock::new(DividendStockTerms {
            purchase_price_per_share: 10_000.0,
            selling_price_per_share: 12_000.0,
            number_of_shares: 100,
            total_dividend_received: 50_000.0,
            trading_fee_pct: 0.015,
            transaction_tax_pct: 0.23,
        })
        .expect("valid stock")
    }

    #[test]
    fn test_reference_round_trip() {
        let r = DividendStockEngine::default().realize(&reference_stock());

        assert_relative_eq!(r.purchase_amount, 1_000_000.0);
        assert_relative_eq!(r.purchase_fee, 150.0, epsilon = 1e-9);
        assert_relative_eq!(r.total_investment, 1_000_150.0, epsilon = 1e-9);
        assert_relative_eq!(r.selling_fee, 180.0, epsilon = 1e-9);
        assert_relative_eq!(r.transaction_tax, 2_760.0, epsilon = 1e-9);
        assert_relative_eq!(r.dividend_tax, 7_700.0, epsilon = 1e-9);
        assert_relative_eq!(r.net_dividend, 42_300.0, epsilon = 1e-9);
        assert_relative_eq!(r.net_profit, 239_210.0, epsilon = 1e-6);
        assert_relative_eq!(r.return_pct, 239_210.0 / 1_000_150.0 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_losing_trade_without_dividends() {
        let stock = DividendStock::new(DividendStockTerms {
            purchase_price_per_share: 100.0,
            selling_price_per_share: 90.0,
            number_of_shares: 10,
            total_dividend_received: 0.0,
            trading_fee_pct: 0.0,
            transaction_tax_pct: 0.0,
        })
        .expect("valid stock");
        let r = DividendStockEngine::default().realize(&stock);

        assert_relative_eq!(r.net_profit, -100.0);
        assert_relative_eq!(r.return_pct, -10.0);
    }

    #[test]
    fn test_dividend_tax_is_configurable() {
        let tax = TaxAssumptions { dividend_income_tax_rate: 0.0, ..Default::default() };
        let r = DividendStockEngine::new(tax).realize(&reference_stock());
        assert_relative_eq!(r.net_dividend, 50_000.0);
    }

    #[test]
    fn test_evaluate_kinds() {
        let metrics = DividendStockEngine::default().evaluate(&reference_stock());

        assert_eq!(metrics.len(), 11);
        assert_eq!(metrics.get(names::PRE_TAX_DIVIDEND), Some(50_000.0));
        let percentages: Vec<&str> = metrics
            .iter()
            .filter(|m| m.kind() == crate::metrics::MetricKind::Percentage)
            .map(|m| m.name())
            .collect();
        assert_eq!(percentages, vec![names::REALIZED_RETURN]);
    }
}
