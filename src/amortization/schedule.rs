//! Schedule output structures for amortization runs

use serde::{Deserialize, Serialize};

use super::AmortizationSystem;
use crate::values::MonetaryAmount;

/// One periodic payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Sequence number, 1-based
    pub number: u32,
    /// Portion that reduces the outstanding balance
    pub amortization: MonetaryAmount,
    /// Portion paid as interest
    pub interest: MonetaryAmount,
    /// amortization + interest, both already rounded to cents
    pub total: MonetaryAmount,
}

impl Installment {
    /// Build an installment from already rounded components
    pub fn new(number: u32, amortization: MonetaryAmount, interest: MonetaryAmount) -> Self {
        Self {
            number,
            amortization,
            interest,
            total: (amortization + interest).round(),
        }
    }
}

/// Complete schedule for one amortization system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub system: AmortizationSystem,
    pub installments: Vec<Installment>,
    /// Sum of every installment total
    pub total: MonetaryAmount,
}

impl AmortizationResult {
    pub fn new(system: AmortizationSystem, installments: Vec<Installment>, total: MonetaryAmount) -> Self {
        Self {
            system,
            installments,
            total,
        }
    }

    /// Sum of the amortization column
    pub fn total_amortization(&self) -> MonetaryAmount {
        self.installments.iter().map(|i| i.amortization).sum()
    }

    /// Sum of the interest column
    pub fn total_interest(&self) -> MonetaryAmount {
        self.installments.iter().map(|i| i.interest).sum()
    }

    /// Principal left unpaid (positive) or overpaid (negative) by per-period rounding
    pub fn residual(&self, principal: MonetaryAmount) -> MonetaryAmount {
        principal - self.total_amortization()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            system: self.system,
            installment_count: self.installments.len() as u32,
            first_installment: self.installments.first().map(|i| i.total).unwrap_or(MonetaryAmount::ZERO),
            last_installment: self.installments.last().map(|i| i.total).unwrap_or(MonetaryAmount::ZERO),
            total_amortization: self.total_amortization(),
            total_interest: self.total_interest(),
            total_paid: self.total,
        }
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub system: AmortizationSystem,
    pub installment_count: u32,
    pub first_installment: MonetaryAmount,
    pub last_installment: MonetaryAmount,
    pub total_amortization: MonetaryAmount,
    pub total_interest: MonetaryAmount,
    pub total_paid: MonetaryAmount,
}
