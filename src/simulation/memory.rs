//! In-process simulation store

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{ProductVolumeAggregate, Simulation};
use crate::amortization::AmortizationSystem;
use crate::ports::SimulationRepository;
use crate::values::MonetaryAmount;

/// Simulations kept in a vector in the order they were saved
#[derive(Debug, Default)]
pub struct InMemorySimulationRepository {
    simulations: RwLock<Vec<Simulation>>,
}

impl InMemorySimulationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.simulations.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SimulationRepository for InMemorySimulationRepository {
    async fn save(&self, simulation: Simulation) -> anyhow::Result<Simulation> {
        self.simulations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(simulation.clone());
        Ok(simulation)
    }

    async fn list_paged(&self, page: u32, page_size: u32) -> anyhow::Result<(Vec<Simulation>, u64)> {
        let simulations = self.simulations.read().unwrap_or_else(PoisonError::into_inner);
        let skip = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);

        let items = simulations
            .iter()
            .skip(skip)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok((items, simulations.len() as u64))
    }

    async fn aggregate_volume_by_date(
        &self,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<ProductVolumeAggregate>> {
        let simulations = self.simulations.read().unwrap_or_else(PoisonError::into_inner);

        let mut groups: BTreeMap<u32, Vec<&Simulation>> = BTreeMap::new();
        for simulation in simulations.iter().filter(|s| s.reference_date() == date) {
            groups.entry(simulation.product().code).or_default().push(simulation);
        }

        Ok(groups.into_values().map(|group| aggregate(&group)).collect())
    }
}

/// Fold one product's simulations into its volume figures
fn aggregate(group: &[&Simulation]) -> ProductVolumeAggregate {
    let first = group[0].product();

    let rate_sum: Decimal = group.iter().map(|s| s.product().monthly_rate.value()).sum();
    let average_rate = rate_sum / Decimal::from(group.len());

    let installment_totals: Vec<MonetaryAmount> = group
        .iter()
        .flat_map(|s| s.results())
        .flat_map(|r| r.installments.iter().map(|i| i.total))
        .collect();
    let average_installment = if installment_totals.is_empty() {
        MonetaryAmount::ZERO
    } else {
        let sum: MonetaryAmount = installment_totals.iter().sum();
        (sum / Decimal::from(installment_totals.len())).round()
    };

    let total_requested = group.iter().map(|s| s.requested_value()).sum();
    let total_credit = group
        .iter()
        .filter_map(|s| s.result(AmortizationSystem::Price))
        .map(|r| r.total)
        .sum();

    ProductVolumeAggregate {
        product_code: first.code,
        description: first.description.clone(),
        average_rate,
        average_installment,
        total_requested,
        total_credit,
    }
}
