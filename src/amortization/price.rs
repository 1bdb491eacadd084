//! Constant installment system (PRICE / French amortization)

use rust_decimal::{Decimal, MathematicalOps};

use super::{AmortizationCalculator, AmortizationResult, AmortizationSystem, Installment};
use crate::values::{InterestRate, MonetaryAmount, TermMonths};

/// Level installment; the amortization portion grows as interest shrinks
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceCalculator;

impl PriceCalculator {
    /// Fixed periodic installment, rounded to cents
    ///
    /// `principal * rate * f / (f - 1)` with `f = (1 + rate)^n`. When `f` exceeds the
    /// decimal range (high rates over long terms) the equivalent discounted form
    /// `principal * rate / (1 - (1 + rate)^-n)` is used instead.
    pub fn fixed_installment(
        principal: MonetaryAmount,
        rate: InterestRate,
        term: TermMonths,
    ) -> MonetaryAmount {
        let r = rate.value();
        let months = u64::from(term.months());
        let growth = Decimal::ONE + r;

        let multiplier = match growth.checked_powu(months) {
            Some(factor) => r * factor / (factor - Decimal::ONE),
            None => {
                let discount = (Decimal::ONE / growth)
                    .checked_powu(months)
                    .unwrap_or(Decimal::ZERO);
                r / (Decimal::ONE - discount)
            }
        };

        (principal * multiplier).round()
    }
}

impl AmortizationCalculator for PriceCalculator {
    fn system(&self) -> AmortizationSystem {
        AmortizationSystem::Price
    }

    fn calculate(
        &self,
        principal: MonetaryAmount,
        rate: InterestRate,
        term: TermMonths,
    ) -> AmortizationResult {
        let months = term.months();
        let installment = Self::fixed_installment(principal, rate, term);
        let total = installment * Decimal::from(months);

        let mut balance = principal;
        let mut installments = Vec::with_capacity(months as usize);

        for number in 1..=months {
            let interest = (balance * rate).round();
            let amortization = (installment - interest).round();
            installments.push(Installment::new(number, amortization, interest));
            balance -= amortization;
        }

        log::debug!(
            "PRICE schedule: principal={} rate={} term={} installment={} residual={}",
            principal,
            rate,
            months,
            installment,
            balance
        );

        AmortizationResult::new(AmortizationSystem::Price, installments, total)
    }
}
