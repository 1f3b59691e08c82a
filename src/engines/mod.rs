//! Calculation engines, one per product type
//!
//! Engines are pure: they read a validated descriptor plus assumptions and
//! return numbers. None of them checks its inputs again.

mod bond;
mod dividend;
mod savings;

pub use bond::{BondValuationEngine, YieldSolution};
pub use dividend::{DividendRealization, DividendStockEngine};
pub use savings::{SavingsAccrual, SavingsAccrualEngine};
