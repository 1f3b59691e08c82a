//! Bond present value and yield-to-maturity solver

use crate::assumptions::{TaxAssumptions, YieldSolverConfig};
use crate::metrics::{names, Diagnostic, MetricSet};
use crate::products::Bond;
use log::{debug, warn};

/// Outcome of the YTM bisection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldSolution {
    /// Annual yield in percent
    pub yield_pct: f64,
    /// Bisection steps taken
    pub iterations: u32,
    /// Whether |price - cost| fell below the tolerance
    pub converged: bool,
    /// price(yield) - acquisition cost at the returned yield
    pub residual: f64,
}

/// Discounted cash flow valuation for fixed-coupon bonds
#[derive(Debug, Clone, Copy, Default)]
pub struct BondValuationEngine {
    tax: TaxAssumptions,
    solver: YieldSolverConfig,
}

impl BondValuationEngine {
    pub fn new(tax: TaxAssumptions, solver: YieldSolverConfig) -> Self {
        Self { tax, solver }
    }

    /// Present value of the remaining coupons plus principal at `annual_yield`
    ///
    /// Coupons are discounted per period at `annual_yield / frequency` over
    /// the truncated number of whole periods; when `apply_tax` is set each
    /// coupon is reduced by the interest income tax first. Strictly
    /// decreasing in yield for non-negative yields.
    pub fn price(&self, annual_yield: f64, bond: &Bond, apply_tax: bool) -> f64 {
        let frequency = bond.coupon_frequency() as f64;
        let mut coupon = bond.face_value() * bond.coupon_rate() / frequency;
        if apply_tax {
            coupon *= self.tax.interest_retention();
        }

        let discount = 1.0 + annual_yield / frequency;
        let periods = bond.coupon_periods();

        let coupons: f64 = (1..=periods).map(|t| coupon / discount.powi(t)).sum();
        coupons + bond.face_value() / discount.powi(periods)
    }

    /// Solve for the yield whose price equals the fee-adjusted purchase price
    ///
    /// Bisects the configured bracket. Returns as soon as the price error is
    /// within tolerance; otherwise the last midpoint is returned with
    /// `converged == false`.
    pub fn solve_ytm(&self, bond: &Bond) -> YieldSolution {
        let cost = bond.acquisition_cost();
        let mut low = self.solver.lower_bound;
        let mut high = self.solver.upper_bound;
        let mut trial = (low + high) / 2.0;
        let mut residual = f64::NAN;

        for iteration in 1..=self.solver.max_iterations {
            trial = (low + high) / 2.0;
            let price = self.price(trial, bond, bond.apply_tax());
            residual = price - cost;

            if residual.abs() < self.solver.tolerance {
                debug!("YTM converged in {} iterations: {:.6}%", iteration, trial * 100.0);
                return YieldSolution {
                    yield_pct: trial * 100.0,
                    iterations: iteration,
                    converged: true,
                    residual,
                };
            }

            // Price too high means the trial yield is too low
            if price > cost {
                low = trial;
            } else {
                high = trial;
            }
        }

        warn!(
            "YTM bisection did not converge after {} iterations (residual {:.6}); returning {:.6}%",
            self.solver.max_iterations,
            residual,
            trial * 100.0
        );
        YieldSolution {
            yield_pct: trial * 100.0,
            iterations: self.solver.max_iterations,
            converged: false,
            residual,
        }
    }

    pub fn evaluate(&self, bond: &Bond) -> MetricSet {
        let solution = self.solve_ytm(bond);

        let mut builder = MetricSet::builder(names::BOND_PRODUCT)
            .percentage(names::YIELD_TO_MATURITY, solution.yield_pct)
            .amount(names::PURCHASE_PRICE, bond.purchase_price())
            .amount(names::ACQUISITION_COST, bond.acquisition_cost())
            .amount(names::FACE_VALUE, bond.face_value());

        if !solution.converged {
            builder = builder.diagnostic(Diagnostic::SolverDidNotConverge {
                iterations: solution.iterations,
                residual: solution.residual,
            });
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::BondTerms;
    use approx::assert_relative_eq;

    fn reference_terms() -> BondTerms {
        BondTerms {
            face_value: 1_000_000.0,
            purchase_price: 950_000.0,
            coupon_rate: 0.05,
            years_to_maturity: 3.0,
            coupon_frequency: 2,
            trading_fee_rate: 0.001,
            apply_tax: true,
        }
    }

    fn bond(terms: BondTerms) -> Bond {
        Bond::new(terms).expect("valid bond")
    }

    #[test]
    fn test_reference_bond_ytm() {
        let engine = BondValuationEngine::default();
        let solution = engine.solve_ytm(&bond(reference_terms()));

        assert!(solution.converged);
        assert!(solution.yield_pct > 6.0 && solution.yield_pct < 8.0);
        assert!((solution.yield_pct - 6.042167).abs() < 1e-5);
        assert!(solution.residual.abs() < 1e-4);
    }

    #[test]
    fn test_untaxed_coupons_yield_more() {
        let engine = BondValuationEngine::default();
        let taxed = engine.solve_ytm(&bond(reference_terms()));
        let gross = engine.solve_ytm(&bond(BondTerms { apply_tax: false, ..reference_terms() }));

        assert!(gross.yield_pct > taxed.yield_pct);
        assert!((gross.yield_pct - 6.836071).abs() < 1e-5);
    }

    #[test]
    fn test_round_trip_recovers_yield() {
        let engine = BondValuationEngine::default();
        let template = bond(BondTerms { trading_fee_rate: 0.0, ..reference_terms() });

        for &target in &[0.01, 0.045, 0.2, 0.73] {
            let fair_price = engine.price(target, &template, true);
            let priced = bond(BondTerms {
                purchase_price: fair_price,
                trading_fee_rate: 0.0,
                ..reference_terms()
            });
            let solution = engine.solve_ytm(&priced);

            assert!(solution.converged);
            assert!(
                (solution.yield_pct - target * 100.0).abs() < 0.01,
                "target {} solved {}",
                target,
                solution.yield_pct
            );
        }
    }

    #[test]
    fn test_price_strictly_decreasing() {
        let engine = BondValuationEngine::default();
        let b = bond(reference_terms());

        let mut previous = engine.price(0.0, &b, true);
        for step in 1..=40 {
            let y = step as f64 * 0.025;
            let current = engine.price(y, &b, true);
            assert!(current < previous, "price not decreasing at {}", y);
            previous = current;
        }
    }

    #[test]
    fn test_price_at_zero_yield_is_undiscounted() {
        let engine = BondValuationEngine::default();
        let b = bond(BondTerms { apply_tax: false, ..reference_terms() });
        // 6 coupons of 25,000 plus principal
        assert_relative_eq!(engine.price(0.0, &b, false), 1_150_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_coupon_closed_form() {
        let engine = BondValuationEngine::default();
        let b = bond(BondTerms { coupon_rate: 0.0, coupon_frequency: 1, ..reference_terms() });
        assert_relative_eq!(
            engine.price(0.05, &b, true),
            1_000_000.0 / 1.05f64.powi(3),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_longest_schedule_prices_below_face() {
        let engine = BondValuationEngine::default();
        let b = bond(BondTerms {
            face_value: 1_000.0,
            purchase_price: 1_000.0,
            coupon_rate: 0.0,
            years_to_maturity: crate::products::MAX_COUPON_PERIODS as f64,
            coupon_frequency: 1,
            ..reference_terms()
        });

        let price = engine.price(0.05, &b, true);
        assert!(price.is_finite());
        assert!((0.0..=1_000.0).contains(&price), "price {}", price);
    }

    #[test]
    fn test_matured_bond_prices_at_face() {
        let engine = BondValuationEngine::default();
        let b = bond(BondTerms { years_to_maturity: 0.0, ..reference_terms() });
        assert_eq!(engine.price(0.3, &b, true), 1_000_000.0);
    }

    #[test]
    fn test_yield_below_bracket_does_not_converge() {
        // No coupon and a price above face: the yield would have to be negative
        let engine = BondValuationEngine::default();
        let b = bond(BondTerms {
            face_value: 1_000.0,
            purchase_price: 2_000.0,
            coupon_rate: 0.0,
            years_to_maturity: 5.0,
            coupon_frequency: 1,
            trading_fee_rate: 0.0,
            apply_tax: false,
        });
        let solution = engine.solve_ytm(&b);

        assert!(!solution.converged);
        assert_eq!(solution.iterations, 100);
        assert!(solution.yield_pct >= 0.0 && solution.yield_pct < 1e-20);
        assert!((solution.residual + 1_000.0).abs() < 1e-6);

        let metrics = engine.evaluate(&b);
        assert_eq!(
            metrics.diagnostics(),
            &[Diagnostic::SolverDidNotConverge { iterations: 100, residual: solution.residual }]
        );
    }

    #[test]
    fn test_iteration_budget_is_configurable() {
        let solver = YieldSolverConfig { max_iterations: 5, ..Default::default() };
        let engine = BondValuationEngine::new(TaxAssumptions::default(), solver);
        let solution = engine.solve_ytm(&bond(reference_terms()));

        assert!(!solution.converged);
        assert_eq!(solution.iterations, 5);
    }

    #[test]
    fn test_evaluate_metrics() {
        let engine = BondValuationEngine::default();
        let metrics = engine.evaluate(&bond(reference_terms()));

        assert_eq!(metrics.product(), names::BOND_PRODUCT);
        assert!(metrics.diagnostics().is_empty());
        assert_eq!(metrics.get(names::PURCHASE_PRICE), Some(950_000.0));
        assert_eq!(metrics.get(names::FACE_VALUE), Some(1_000_000.0));
        assert_relative_eq!(
            metrics.get(names::ACQUISITION_COST).unwrap(),
            950_950.0,
            epsilon = 1e-6
        );
        let ytm = metrics.get(names::YIELD_TO_MATURITY).unwrap();
        assert!(ytm > 6.0 && ytm < 8.0);
    }
}
