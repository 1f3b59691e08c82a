//! Routes a product to its engine

use crate::assumptions::Assumptions;
use crate::engines::{BondValuationEngine, DividendStockEngine, SavingsAccrualEngine};
use crate::metrics::MetricSet;
use crate::products::{Bond, DividendStock, Product, TieredSavingsAccount};
use log::debug;

/// Evaluates any `Product` under one set of assumptions
///
/// Holds no state besides the assumptions; evaluating the same product twice
/// gives identical results.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    assumptions: Assumptions,
}

impl Calculator {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn evaluate(&self, product: &Product) -> MetricSet {
        debug!("Evaluating {}", product.label());
        match product {
            Product::Bond(bond) => self.evaluate_bond(bond),
            Product::TieredSavings(account) => self.evaluate_savings(account),
            Product::DividendStock(stock) => self.evaluate_dividend_stock(stock),
        }
    }

    pub fn evaluate_bond(&self, bond: &Bond) -> MetricSet {
        BondValuationEngine::new(self.assumptions.tax, self.assumptions.solver).evaluate(bond)
    }

    pub fn evaluate_savings(&self, account: &TieredSavingsAccount) -> MetricSet {
        SavingsAccrualEngine::new(self.assumptions.tax).evaluate(account)
    }

    pub fn evaluate_dividend_stock(&self, stock: &DividendStock) -> MetricSet {
        DividendStockEngine::new(self.assumptions.tax).evaluate(stock)
    }
}
