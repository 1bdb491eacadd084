//! Amortization systems: constant amortization (SAC) and constant installment (PRICE)
//!
//! Both calculators are pure functions of `(principal, monthly rate, term)`. Every
//! interest, amortization and installment figure is rounded to cents half away from
//! zero as it is produced. Neither system corrects the final period, so the sum of
//! the amortization column may differ from the principal by the accumulated rounding.

mod schedule;
mod sac;
mod price;

pub use schedule::{AmortizationResult, Installment, ScheduleSummary};
pub use sac::SacCalculator;
pub use price::PriceCalculator;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::values::{InterestRate, MonetaryAmount, TermMonths};

/// Trait for amortization calculators
pub trait AmortizationCalculator {
    /// System this calculator implements
    fn system(&self) -> AmortizationSystem;

    /// Build the full installment schedule
    fn calculate(
        &self,
        principal: MonetaryAmount,
        rate: InterestRate,
        term: TermMonths,
    ) -> AmortizationResult;
}

/// The closed set of supported amortization systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmortizationSystem {
    /// Constant amortization; interest and installments decrease
    #[serde(rename = "SAC")]
    Sac,
    /// Constant installment; amortization increases as interest decreases
    #[serde(rename = "PRICE")]
    Price,
}

impl AmortizationSystem {
    /// Every registered system, in output order
    pub const ALL: [AmortizationSystem; 2] = [AmortizationSystem::Sac, AmortizationSystem::Price];

    pub fn as_str(&self) -> &'static str {
        match self {
            AmortizationSystem::Sac => "SAC",
            AmortizationSystem::Price => "PRICE",
        }
    }

    /// Run this system's calculator
    pub fn calculate(
        &self,
        principal: MonetaryAmount,
        rate: InterestRate,
        term: TermMonths,
    ) -> AmortizationResult {
        match self {
            AmortizationSystem::Sac => SacCalculator.calculate(principal, rate, term),
            AmortizationSystem::Price => PriceCalculator.calculate(principal, rate, term),
        }
    }
}

impl fmt::Display for AmortizationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run every registered system against the same inputs
pub fn calculate_all(
    principal: MonetaryAmount,
    rate: InterestRate,
    term: TermMonths,
) -> Vec<AmortizationResult> {
    AmortizationSystem::ALL
        .iter()
        .map(|system| system.calculate(principal, rate, term))
        .collect()
}
