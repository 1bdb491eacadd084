//! Collaborator contracts consumed by the simulation core
//!
//! Implementations live outside the core (databases, brokers, HTTP telemetry); the
//! crate ships in-memory and log-backed versions for the binaries and tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::dispatch::{RequestMetric, SimulationPayload};
use crate::product::Product;
use crate::simulation::{ProductVolumeAggregate, Simulation};

/// Source of the full product catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// One bulk read of every product, unfiltered
    async fn fetch_all_products(&self) -> anyhow::Result<Vec<Product>>;
}

/// Durable storage for accepted simulations
#[async_trait]
pub trait SimulationRepository: Send + Sync {
    /// Persist a simulation, returning the stored form
    async fn save(&self, simulation: Simulation) -> anyhow::Result<Simulation>;

    /// One page (1-based) of simulations plus the total count
    async fn list_paged(&self, page: u32, page_size: u32) -> anyhow::Result<(Vec<Simulation>, u64)>;

    /// Per-product volume for simulations referenced on `date`
    async fn aggregate_volume_by_date(
        &self,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<ProductVolumeAggregate>>;
}

/// Downstream consumer of accepted simulations
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, payload: &SimulationPayload) -> anyhow::Result<()>;
}

/// Consumer of per-request telemetry
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn record_request_metric(&self, metric: &RequestMetric) -> anyhow::Result<()>;
}
