//! Product descriptors
//!
//! Each descriptor validates its inputs on construction and is immutable
//! afterwards. `Product` is the closed set the calculator dispatches on.

mod bond;
mod dividend;
mod savings;

pub use bond::{Bond, BondTerms, MAX_COUPON_PERIODS};
pub use dividend::{DividendStock, DividendStockTerms};
pub use savings::{InterestRateTier, SavingsTerms, TierTerms, TieredSavingsAccount};

use crate::metrics::names;
use serde::Deserialize;

/// Any product the calculator can evaluate
///
/// In JSON the variant is selected by a `"product"` field:
/// `{"product": "bond", "face_value": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "product", rename_all = "snake_case")]
pub enum Product {
    Bond(Bond),
    TieredSavings(TieredSavingsAccount),
    DividendStock(DividendStock),
}

impl Product {
    /// Human-readable product label used on reports
    pub fn label(&self) -> &'static str {
        match self {
            Product::Bond(_) => names::BOND_PRODUCT,
            Product::TieredSavings(_) => names::SAVINGS_PRODUCT,
            Product::DividendStock(_) => names::DIVIDEND_STOCK_PRODUCT,
        }
    }
}

impl From<Bond> for Product {
    fn from(bond: Bond) -> Self { Product::Bond(bond) }
}

impl From<TieredSavingsAccount> for Product {
    fn from(account: TieredSavingsAccount) -> Self { Product::TieredSavings(account) }
}

impl From<DividendStock> for Product {
    fn from(stock: DividendStock) -> Self { Product::DividendStock(stock) }
}
