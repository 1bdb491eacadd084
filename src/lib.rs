//! Credit Simulation - amortization schedules and product eligibility for loan requests
//!
//! This library provides:
//! - Bounded value types for money, monthly rates and terms
//! - Constant amortization (SAC) and constant installment (PRICE) schedules
//! - Product catalog loading with a time-bounded cache
//! - Request orchestration: validate, select product, calculate, persist, announce
//! - Detached best-effort event and telemetry dispatch

pub mod values;
pub mod amortization;
pub mod product;
pub mod simulation;
pub mod dispatch;
pub mod ports;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use values::{InterestRate, MonetaryAmount, TermMonths, ValueError};
pub use amortization::{AmortizationCalculator, AmortizationResult, AmortizationSystem, Installment};
pub use product::{Product, ProductCache};
pub use simulation::{CancelSignal, Simulation, SimulationService};
pub use dispatch::Dispatcher;
pub use config::SimulationConfig;
pub use error::SimulationError;
