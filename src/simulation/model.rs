//! Simulation aggregate and read-side shapes

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amortization::{AmortizationResult, AmortizationSystem};
use crate::product::Product;
use crate::values::{InterestRate, MonetaryAmount, TermMonths};

/// The product terms a simulation was priced with, frozen at creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub code: u32,
    pub description: String,
    pub monthly_rate: InterestRate,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code,
            description: product.description.clone(),
            monthly_rate: product.monthly_rate,
        }
    }
}

/// One accepted simulation request with every amortization schedule
///
/// Built once by the service and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    id: Uuid,
    product: ProductSnapshot,
    requested_value: MonetaryAmount,
    term: TermMonths,
    reference_date: NaiveDate,
    results: Vec<AmortizationResult>,
}

impl Simulation {
    /// Assemble a new simulation with a fresh identity
    pub fn new(
        product: &Product,
        requested_value: MonetaryAmount,
        term: TermMonths,
        reference_date: NaiveDate,
        results: Vec<AmortizationResult>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product: ProductSnapshot::from(product),
            requested_value,
            term,
            reference_date,
            results,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    pub fn requested_value(&self) -> MonetaryAmount {
        self.requested_value
    }

    pub fn term(&self) -> TermMonths {
        self.term
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn results(&self) -> &[AmortizationResult] {
        &self.results
    }

    /// Schedule for one system, if it was computed
    pub fn result(&self, system: AmortizationSystem) -> Option<&AmortizationResult> {
        self.results.iter().find(|r| r.system == system)
    }
}

/// Daily volume for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVolumeAggregate {
    pub product_code: u32,
    pub description: String,
    /// Mean monthly rate over the grouped simulations
    pub average_rate: Decimal,
    /// Mean installment total over every installment of every schedule
    pub average_installment: MonetaryAmount,
    /// Sum of requested values
    pub total_requested: MonetaryAmount,
    /// Sum of constant-installment schedule totals
    pub total_credit: MonetaryAmount,
}

/// One page of a simulation listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationPage {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub simulations: Vec<Simulation>,
}

impl SimulationPage {
    /// Number of pages needed for `total_count` at this page size
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(u64::from(self.page_size))
        }
    }
}
