//! Simulation orchestration
//!
//! A request runs validation, product selection, calculation and persistence in that
//! order, each step finishing before the next starts. Only after persistence succeeds
//! is the event dispatched, on a detached task that the request neither awaits nor
//! cancels.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{CancelSignal, ProductVolumeAggregate, Simulation, SimulationPage};
use crate::amortization::calculate_all;
use crate::config::SimulationConfig;
use crate::dispatch::Dispatcher;
use crate::error::SimulationError;
use crate::ports::{CatalogSource, SimulationRepository};
use crate::product::ProductCache;
use crate::values::{MonetaryAmount, TermMonths, ValueError, MONEY_SCALE};

/// Orchestrates one simulation request end to end
///
/// The service owns its catalog cache, built from the configured time-to-live.
pub struct SimulationService {
    catalog: Arc<ProductCache>,
    repository: Arc<dyn SimulationRepository>,
    dispatcher: Dispatcher,
    config: SimulationConfig,
}

impl SimulationService {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        repository: Arc<dyn SimulationRepository>,
        dispatcher: Dispatcher,
        config: SimulationConfig,
    ) -> Self {
        Self {
            catalog: Arc::new(ProductCache::new(source, config.catalog_ttl)),
            repository,
            dispatcher,
            config,
        }
    }

    /// Validate, price, persist and announce a simulation
    ///
    /// Persistence errors come back exactly as the repository raised them. Dispatch
    /// outcomes never reach the caller.
    pub async fn run_simulation(
        &self,
        value: Decimal,
        term: i64,
        cancel: &CancelSignal,
    ) -> Result<Simulation, SimulationError> {
        if cancel.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }

        let (value, term) = validate(value, term)?;

        let product = until_cancelled(cancel, self.catalog.get_eligible(value, term))
            .await?
            .ok_or(SimulationError::NoEligibleProduct {
                value: value.value(),
                term: term.months(),
            })?;

        if cancel.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }

        let results = calculate_all(value, product.monthly_rate, term);
        let simulation = Simulation::new(&product, value, term, self.config.reference_date(), results);

        let repository = Arc::clone(&self.repository);
        let saved = until_cancelled(cancel, async move {
            repository
                .save(simulation)
                .await
                .map_err(SimulationError::Persistence)
        })
        .await?;

        log::info!(
            "Simulation {} accepted: product {} value {} term {}",
            saved.id(),
            saved.product().code,
            saved.requested_value(),
            saved.term()
        );

        // Detached: the handle is dropped and the request's signal is not passed on
        self.dispatcher.publish_simulation(&saved);

        Ok(saved)
    }

    /// One page of persisted simulations
    pub async fn list_simulations(&self, page: u32, page_size: u32) -> Result<SimulationPage, SimulationError> {
        if page == 0 || page_size == 0 || page_size > self.config.max_page_size {
            return Err(SimulationError::InvalidPage { page, page_size });
        }

        let (simulations, total_count) = self
            .repository
            .list_paged(page, page_size)
            .await
            .map_err(SimulationError::Persistence)?;

        Ok(SimulationPage {
            page,
            page_size,
            total_count,
            simulations,
        })
    }

    /// Per-product volume for simulations referenced on `date`
    pub async fn volume_by_date(&self, date: NaiveDate) -> Result<Vec<ProductVolumeAggregate>, SimulationError> {
        self.repository
            .aggregate_volume_by_date(date)
            .await
            .map_err(SimulationError::Persistence)
    }

    pub fn catalog(&self) -> &ProductCache {
        &self.catalog
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

/// Build the bounded request values, reporting every violation at once
///
/// A requested value finer than a cent is rejected rather than rounded.
pub fn validate(value: Decimal, term: i64) -> Result<(MonetaryAmount, TermMonths), SimulationError> {
    let value = if value.normalize().scale() > MONEY_SCALE {
        Err(ValueError::new(
            "value",
            format!("loan value must not have more than {} decimal places", MONEY_SCALE),
        ))
    } else {
        MonetaryAmount::loan_value(value)
    };

    match (value, TermMonths::new(term)) {
        (Ok(value), Ok(term)) => Ok((value, term)),
        (value, term) => {
            let violations = [value.err(), term.err()].into_iter().flatten().collect();
            Err(SimulationError::Validation(violations))
        }
    }
}

async fn until_cancelled<T, F>(cancel: &CancelSignal, work: F) -> Result<T, SimulationError>
where
    F: Future<Output = Result<T, SimulationError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SimulationError::Cancelled),
        outcome = work => outcome,
    }
}
