//! Property tests for the SAC and PRICE schedules over the full input domain

use credit_simulation::amortization::{AmortizationResult, AmortizationSystem};
use credit_simulation::{InterestRate, MonetaryAmount, TermMonths};
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CENT: Decimal = dec!(0.01);

/// Any accepted loan value, 0.01 to 999,999,999.99
fn principal_strategy() -> impl Strategy<Value = MonetaryAmount> {
    (1i64..=99_999_999_999).prop_map(|cents| MonetaryAmount::loan_value(Decimal::new(cents, 2)).unwrap())
}

/// Any accepted monthly rate, 0.000001 to 0.50
fn rate_strategy() -> impl Strategy<Value = InterestRate> {
    (1i64..=500_000).prop_map(|micros| InterestRate::new(Decimal::new(micros, 6)).unwrap())
}

fn term_strategy() -> impl Strategy<Value = TermMonths> {
    (1i64..=600).prop_map(|months| TermMonths::new(months).unwrap())
}

/// Upper bound on PRICE drift: a cent of error per period compounded at the rate
fn compounded_cent_bound(rate: InterestRate, term: TermMonths) -> f64 {
    let r = rate.value().to_f64().unwrap();
    let accumulation = ((1.0 + r).powi(term.months() as i32) - 1.0) / r;
    0.01 * accumulation * 1.0001 + 1e-9
}

fn assert_rows_consistent(result: &AmortizationResult, term: TermMonths) -> Result<(), TestCaseError> {
    prop_assert_eq!(result.installments.len(), term.months() as usize);
    for (index, row) in result.installments.iter().enumerate() {
        prop_assert_eq!(row.number as usize, index + 1);
        prop_assert_eq!(row.total.value(), row.amortization.value() + row.interest.value());
        prop_assert_eq!(row.total.value(), row.total.value().round_dp(2));
    }
    let sum: Decimal = result.installments.iter().map(|r| r.total.value()).sum();
    prop_assert_eq!(result.total.value(), sum);
    Ok(())
}

proptest! {
    /// Every row is amortization + interest at cent precision, numbered 1..n
    #[test]
    fn prop_rows_add_up(
        principal in principal_strategy(),
        rate in rate_strategy(),
        term in term_strategy(),
    ) {
        for system in AmortizationSystem::ALL {
            let result = system.calculate(principal, rate, term);
            assert_rows_consistent(&result, term)?;
        }
    }

    /// SAC repays the principal within a cent per installment
    #[test]
    fn prop_sac_residual_within_tolerance(
        principal in principal_strategy(),
        rate in rate_strategy(),
        term in term_strategy(),
    ) {
        let result = AmortizationSystem::Sac.calculate(principal, rate, term);
        let tolerance = CENT * Decimal::from(term.months());
        prop_assert!(result.residual(principal).value().abs() <= tolerance);
    }

    /// SAC amortization is constant while interest and installments fall
    #[test]
    fn prop_sac_decreasing(
        principal in principal_strategy(),
        rate in rate_strategy(),
        term in term_strategy(),
    ) {
        let result = AmortizationSystem::Sac.calculate(principal, rate, term);
        let amortization = result.installments[0].amortization;
        let strict = amortization.value() * rate.value() >= CENT;

        for pair in result.installments.windows(2) {
            prop_assert_eq!(pair[1].amortization, amortization);
            if strict {
                prop_assert!(pair[1].interest < pair[0].interest);
                prop_assert!(pair[1].total < pair[0].total);
            } else {
                prop_assert!(pair[1].interest <= pair[0].interest);
                prop_assert!(pair[1].total <= pair[0].total);
            }
        }
    }

    /// PRICE installments are level and amortization grows as interest falls
    #[test]
    fn prop_price_level_installment(
        principal in principal_strategy(),
        rate in rate_strategy(),
        term in term_strategy(),
    ) {
        let result = AmortizationSystem::Price.calculate(principal, rate, term);
        let level = result.installments[0].total;

        for pair in result.installments.windows(2) {
            prop_assert_eq!(pair[1].total, level);
            prop_assert!(pair[1].interest <= pair[0].interest);
            if pair[0].amortization.value() * rate.value() >= CENT {
                prop_assert!(pair[1].amortization > pair[0].amortization);
                prop_assert!(pair[1].interest < pair[0].interest);
            } else {
                prop_assert!(pair[1].amortization >= pair[0].amortization);
            }
        }
    }

    /// PRICE drift stays within the compounded per-period rounding bound
    #[test]
    fn prop_price_residual_bounded(
        principal in principal_strategy(),
        rate in rate_strategy(),
        term in term_strategy(),
    ) {
        let result = AmortizationSystem::Price.calculate(principal, rate, term);
        let residual = result.residual(principal).value().abs().to_f64().unwrap();
        prop_assert!(residual <= compounded_cent_bound(rate, term));
    }

    /// For ordinary consumer loans PRICE also meets the cent-per-installment tolerance
    #[test]
    fn prop_price_residual_within_tolerance_for_consumer_loans(
        cents in 1_000i64..=10_000_000_000,
        micros in 100i64..=10_000,
        months in 1i64..=48,
    ) {
        let principal = MonetaryAmount::loan_value(Decimal::new(cents, 2)).unwrap();
        let rate = InterestRate::new(Decimal::new(micros, 6)).unwrap();
        let term = TermMonths::new(months).unwrap();

        let result = AmortizationSystem::Price.calculate(principal, rate, term);
        let tolerance = CENT * Decimal::from(term.months());
        prop_assert!(result.residual(principal).value().abs() <= tolerance);
    }

    /// Same inputs, same schedule
    #[test]
    fn prop_deterministic(
        principal in principal_strategy(),
        rate in rate_strategy(),
        term in term_strategy(),
    ) {
        for system in AmortizationSystem::ALL {
            prop_assert_eq!(system.calculate(principal, rate, term), system.calculate(principal, rate, term));
        }
    }
}
