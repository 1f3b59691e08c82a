//! Yield Analyzer - after-tax, after-fee returns for retail products
//!
//! This library provides:
//! - Yield to maturity of fixed-coupon bonds via bisection on the price
//! - Tiered-rate installment savings with per-deposit simple interest
//! - Realized return on dividend stock round trips
//! - A common `MetricSet` result with amount/percentage tagged entries

pub mod assumptions;
pub mod calculator;
pub mod engines;
pub mod error;
pub mod metrics;
pub mod products;

// Re-export commonly used types
pub use assumptions::{Assumptions, TaxAssumptions, YieldSolverConfig};
pub use calculator::Calculator;
pub use engines::{BondValuationEngine, DividendStockEngine, SavingsAccrualEngine, YieldSolution};
pub use error::{AnalyzerError, Result, ValidationError};
pub use metrics::{Diagnostic, Metric, MetricKind, MetricSet};
pub use products::{Bond, BondTerms, DividendStock, DividendStockTerms, InterestRateTier, Product, TieredSavingsAccount};
