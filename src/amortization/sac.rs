//! Constant amortization system (SAC)

use rust_decimal::Decimal;

use super::{AmortizationCalculator, AmortizationResult, AmortizationSystem, Installment};
use crate::values::{InterestRate, MonetaryAmount, TermMonths};

/// Equal principal repayment every month; interest is charged on the declining balance
#[derive(Debug, Clone, Copy, Default)]
pub struct SacCalculator;

impl AmortizationCalculator for SacCalculator {
    fn system(&self) -> AmortizationSystem {
        AmortizationSystem::Sac
    }

    fn calculate(
        &self,
        principal: MonetaryAmount,
        rate: InterestRate,
        term: TermMonths,
    ) -> AmortizationResult {
        let months = term.months();
        let amortization = (principal / Decimal::from(months)).round();

        let mut balance = principal;
        let mut installments = Vec::with_capacity(months as usize);

        for number in 1..=months {
            let interest = (balance * rate).round();
            installments.push(Installment::new(number, amortization, interest));

            // amortization is already at cent precision
            balance -= amortization;
        }

        let total = installments.iter().map(|i| i.total).sum();
        log::debug!(
            "SAC schedule: principal={} rate={} term={} total={}",
            principal,
            rate,
            months,
            total
        );

        AmortizationResult::new(AmortizationSystem::Sac, installments, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn run(principal: Decimal, rate: Decimal, months: i64) -> AmortizationResult {
        SacCalculator.calculate(
            MonetaryAmount::loan_value(principal).unwrap(),
            InterestRate::new(rate).unwrap(),
            TermMonths::new(months).unwrap(),
        )
    }

    fn amount(value: Decimal) -> MonetaryAmount {
        MonetaryAmount::new(value).unwrap()
    }

    #[test]
    fn test_three_month_schedule() {
        let result = run(dec!(1000.00), dec!(0.01), 3);
        let rows = &result.installments;

        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].amortization, amount(dec!(333.33)));
        assert_eq!(rows[0].interest, amount(dec!(10.00)));
        assert_eq!(rows[0].total, amount(dec!(343.33)));

        assert_eq!(rows[1].amortization, amount(dec!(333.33)));
        assert_eq!(rows[1].interest, amount(dec!(6.67)));
        assert_eq!(rows[1].total, amount(dec!(340.00)));

        // No terminal correction: the last amortization stays at 333.33
        assert_eq!(rows[2].amortization, amount(dec!(333.33)));
        assert_eq!(rows[2].interest, amount(dec!(3.33)));
        assert_eq!(rows[2].total, amount(dec!(336.66)));

        assert_eq!(result.total, amount(dec!(1019.99)));
        assert_eq!(result.residual(amount(dec!(1000.00))).value(), dec!(0.01));
    }

    #[test]
    fn test_catalog_rate_schedule() {
        let result = run(dec!(10000.00), dec!(0.0175), 36);
        let rows = &result.installments;

        assert_eq!(rows[0].amortization, amount(dec!(277.78)));
        assert_eq!(rows[0].interest, amount(dec!(175.00)));
        assert_eq!(rows[0].total, amount(dec!(452.78)));

        assert_eq!(rows[1].interest, amount(dec!(170.14)));
        assert_eq!(rows[1].total, amount(dec!(447.92)));

        assert_eq!(rows[35].interest, amount(dec!(4.86)));
        assert_eq!(rows[35].total, amount(dec!(282.64)));
    }

    #[test]
    fn test_decreasing_interest_and_installment() {
        let result = run(dec!(50000.00), dec!(0.0182), 60);

        for pair in result.installments.windows(2) {
            assert_eq!(pair[0].amortization, pair[1].amortization);
            assert!(pair[1].interest < pair[0].interest);
            assert!(pair[1].total < pair[0].total);
        }
    }

    #[test]
    fn test_single_month() {
        let result = run(dec!(0.01), dec!(0.5), 1);

        assert_eq!(result.installments.len(), 1);
        assert_eq!(result.installments[0].amortization, amount(dec!(0.01)));
        // 0.005 rounds away from zero
        assert_eq!(result.installments[0].interest, amount(dec!(0.01)));
        assert_eq!(result.total, amount(dec!(0.02)));
    }

    #[test]
    fn test_system_tag() {
        assert_eq!(SacCalculator.system(), AmortizationSystem::Sac);
        assert_eq!(run(dec!(100), dec!(0.01), 2).system, AmortizationSystem::Sac);
    }
}
