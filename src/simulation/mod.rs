//! The simulation aggregate, its in-memory store, and the request orchestrator

mod cancel;
mod memory;
mod model;
mod service;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use memory::InMemorySimulationRepository;
pub use model::{ProductSnapshot, ProductVolumeAggregate, Simulation, SimulationPage};
pub use service::{validate, SimulationService};
