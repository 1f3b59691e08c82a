//! Simple-interest accrual for tiered installment savings
//!
//! Every monthly deposit earns simple interest from the month it is paid
//! until the end of the schedule. A deposit paid in month `m` of a
//! `T`-month account stays invested for `T - m + 1` months, and those months
//! are laid over the tiers from the start of the schedule: a deposit with 4
//! months left in a (6 mo, 6 mo) schedule earns 4 months at the first rate.

use crate::assumptions::TaxAssumptions;
use crate::metrics::{names, MetricSet};
use crate::products::{InterestRateTier, TieredSavingsAccount};
use log::debug;

/// Totals produced by a savings accrual run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsAccrual {
    pub total_months: u32,
    pub principal: f64,
    pub total_interest: f64,
    pub tax: f64,
    pub after_tax_interest: f64,
    pub final_amount: f64,
    /// Annualized after-tax yield in percent
    pub effective_apy: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SavingsAccrualEngine {
    tax: TaxAssumptions,
}

impl SavingsAccrualEngine {
    pub fn new(tax: TaxAssumptions) -> Self {
        Self { tax }
    }

    /// Months of a deposit's remaining horizon falling into each tier
    ///
    /// The result has one entry per tier and sums to
    /// `min(months_remaining, total tier months)`.
    pub fn apportion(tiers: &[InterestRateTier], months_remaining: u32) -> Vec<u32> {
        let mut elapsed = 0u32;
        tiers
            .iter()
            .map(|tier| {
                let months = tier.months().min(months_remaining.saturating_sub(elapsed));
                elapsed = elapsed.saturating_add(tier.months());
                months
            })
            .collect()
    }

    pub fn accrue(&self, account: &TieredSavingsAccount) -> SavingsAccrual {
        let deposit = account.monthly_deposit();
        let tiers = account.tiers();
        let total_months = account.total_months();

        let mut principal = 0.0;
        let mut total_interest = 0.0;

        for month in 1..=total_months {
            principal += deposit;
            let months_remaining = total_months - month + 1;

            let mut deposit_interest = 0.0;
            for (tier, months) in tiers.iter().zip(Self::apportion(tiers, months_remaining)) {
                if months > 0 {
                    deposit_interest += deposit * tier.annual_rate() * (months as f64 / 12.0);
                }
            }
            total_interest += deposit_interest;
        }

        let tax = total_interest * self.tax.interest_income_tax_rate;
        let after_tax_interest = total_interest - tax;
        let final_amount = principal + after_tax_interest;

        // Closed-form annualization over the average half-principal exposure
        let effective_apy =
            (after_tax_interest / principal) * (12.0 / (total_months as f64 + 1.0)) * 2.0 * 100.0;

        debug!(
            "Savings accrual: {} months, principal {:.2}, interest {:.2}, APY {:.4}%",
            total_months, principal, total_interest, effective_apy
        );

        SavingsAccrual {
            total_months,
            principal,
            total_interest,
            tax,
            after_tax_interest,
            final_amount,
            effective_apy,
        }
    }

    pub fn evaluate(&self, account: &TieredSavingsAccount) -> MetricSet {
        let accrual = self.accrue(account);

        MetricSet::builder(names::SAVINGS_PRODUCT)
            .amount(names::TOTAL_PRINCIPAL, accrual.principal)
            .amount(names::PRE_TAX_INTEREST, accrual.total_interest)
            .amount(names::INTEREST_TAX, accrual.tax)
            .amount(names::POST_TAX_PAYOUT, accrual.final_amount)
            .percentage(names::EFFECTIVE_ANNUAL_YIELD, accrual.effective_apy)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tier(months: u32, pct: f64) -> InterestRateTier {
        InterestRateTier::from_percent(months, pct).expect("valid tier")
    }

    fn two_tier_account() -> TieredSavingsAccount {
        TieredSavingsAccount::new(100_000.0, vec![tier(6, 3.5), tier(6, 7.0)]).expect("valid account")
    }

    #[test]
    fn test_two_tier_reference() {
        let accrual = SavingsAccrualEngine::default().accrue(&two_tier_account());

        assert_eq!(accrual.total_months, 12);
        assert_relative_eq!(accrual.principal, 1_200_000.0);
        // 57 months at 3.5% and 21 months at 7.0% on 100,000 each
        assert_relative_eq!(accrual.total_interest, 28_875.0, epsilon = 1e-6);
        assert_relative_eq!(accrual.tax, 4_446.75, epsilon = 1e-6);
        assert_relative_eq!(accrual.final_amount, 1_200_000.0 + 28_875.0 * 0.846, epsilon = 1e-6);
        assert_relative_eq!(accrual.effective_apy, 3.758192307692308, epsilon = 1e-9);
    }

    #[test]
    fn test_single_month_boundary() {
        let account = TieredSavingsAccount::new(50_000.0, vec![tier(1, 6.0)]).expect("valid account");
        let accrual = SavingsAccrualEngine::default().accrue(&account);

        assert_eq!(accrual.total_months, 1);
        assert_eq!(accrual.principal, 50_000.0);
        assert_relative_eq!(accrual.total_interest, 50_000.0 * 0.06 / 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_apportion_examples() {
        let tiers = vec![tier(6, 3.5), tier(6, 7.0)];
        assert_eq!(SavingsAccrualEngine::apportion(&tiers, 12), vec![6, 6]);
        assert_eq!(SavingsAccrualEngine::apportion(&tiers, 8), vec![6, 2]);
        assert_eq!(SavingsAccrualEngine::apportion(&tiers, 4), vec![4, 0]);
        assert_eq!(SavingsAccrualEngine::apportion(&tiers, 0), vec![0, 0]);
    }

    #[test]
    fn test_apportion_conserves_months() {
        let tiers = vec![tier(3, 2.0), tier(5, 3.0), tier(1, 4.0), tier(7, 5.0)];
        let total: u32 = tiers.iter().map(|t| t.months()).sum();

        let mut per_tier = vec![0u32; tiers.len()];
        for remaining in 1..=total {
            let split = SavingsAccrualEngine::apportion(&tiers, remaining);
            // No month of a deposit's horizon is skipped or double counted
            assert_eq!(split.iter().sum::<u32>(), remaining);
            for (acc, m) in per_tier.iter_mut().zip(&split) {
                *acc += m;
            }
        }

        // Per tier: sum over deposits of the part of the horizon reaching it
        let mut start = 0u32;
        for (i, t) in tiers.iter().enumerate() {
            let expected: u32 = (1..=total)
                .map(|remaining| remaining.saturating_sub(start).min(t.months()))
                .sum();
            assert_eq!(per_tier[i], expected);
            start += t.months();
        }
    }

    #[test]
    fn test_apportion_saturates_on_huge_tiers() {
        let tiers = vec![tier(u32::MAX, 1.0), tier(u32::MAX, 2.0), tier(5, 3.0)];
        assert_eq!(SavingsAccrualEngine::apportion(&tiers, 10), vec![10, 0, 0]);
        assert_eq!(
            SavingsAccrualEngine::apportion(&tiers, u32::MAX),
            vec![u32::MAX, 0, 0]
        );
    }

    #[test]
    fn test_flat_schedule_matches_single_tier() {
        let engine = SavingsAccrualEngine::default();
        let split = TieredSavingsAccount::new(10_000.0, vec![tier(4, 3.0), tier(8, 3.0)]).unwrap();
        let flat = TieredSavingsAccount::new(10_000.0, vec![tier(12, 3.0)]).unwrap();

        assert_relative_eq!(
            engine.accrue(&split).total_interest,
            engine.accrue(&flat).total_interest,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_tax_exempt() {
        let engine = SavingsAccrualEngine::new(TaxAssumptions::exempt());
        let accrual = engine.accrue(&two_tier_account());

        assert_eq!(accrual.tax, 0.0);
        assert_relative_eq!(accrual.final_amount, 1_228_875.0, epsilon = 1e-6);
    }

    #[test]
    fn test_evaluate_metric_order() {
        let metrics = SavingsAccrualEngine::default().evaluate(&two_tier_account());
        let order: Vec<&str> = metrics.iter().map(|m| m.name()).collect();

        assert_eq!(
            order,
            vec![
                names::TOTAL_PRINCIPAL,
                names::PRE_TAX_INTEREST,
                names::INTEREST_TAX,
                names::POST_TAX_PAYOUT,
                names::EFFECTIVE_ANNUAL_YIELD,
            ]
        );
    }
}
