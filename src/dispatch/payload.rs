//! Outbound shapes handed to the event and metrics sinks
//!
//! The payload is mapped field by field from the aggregate so the wire shape can
//! drift from the domain types without touching them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amortization::{AmortizationResult, Installment};
use crate::simulation::Simulation;

/// Published once per persisted simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPayload {
    pub simulation_id: Uuid,
    pub product_code: u32,
    pub product_description: String,
    pub monthly_rate: Decimal,
    pub requested_value: Decimal,
    pub term_months: u32,
    pub reference_date: NaiveDate,
    pub results: Vec<SchedulePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    pub system: String,
    pub total: Decimal,
    pub installments: Vec<InstallmentPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPayload {
    pub number: u32,
    pub amortization: Decimal,
    pub interest: Decimal,
    pub total: Decimal,
}

impl From<&Simulation> for SimulationPayload {
    fn from(simulation: &Simulation) -> Self {
        let product = simulation.product();
        Self {
            simulation_id: simulation.id(),
            product_code: product.code,
            product_description: product.description.clone(),
            monthly_rate: product.monthly_rate.value(),
            requested_value: simulation.requested_value().value(),
            term_months: simulation.term().months(),
            reference_date: simulation.reference_date(),
            results: simulation.results().iter().map(SchedulePayload::from).collect(),
        }
    }
}

impl From<&AmortizationResult> for SchedulePayload {
    fn from(result: &AmortizationResult) -> Self {
        Self {
            system: result.system.as_str().to_string(),
            total: result.total.value(),
            installments: result.installments.iter().map(InstallmentPayload::from).collect(),
        }
    }
}

impl From<&Installment> for InstallmentPayload {
    fn from(installment: &Installment) -> Self {
        Self {
            number: installment.number,
            amortization: installment.amortization.value(),
            interest: installment.interest.value(),
            total: installment.total.value(),
        }
    }
}

/// Timing of one handled request, reported by the surrounding request layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetric {
    pub api_name: String,
    pub endpoint: String,
    pub elapsed_ms: u64,
    pub success: bool,
    pub status_code: u16,
    pub recorded_at: DateTime<Utc>,
}

impl RequestMetric {
    /// Metric stamped with the current time
    pub fn new(
        api_name: impl Into<String>,
        endpoint: impl Into<String>,
        elapsed_ms: u64,
        success: bool,
        status_code: u16,
    ) -> Self {
        Self {
            api_name: api_name.into(),
            endpoint: endpoint.into(),
            elapsed_ms,
            success,
            status_code,
            recorded_at: Utc::now(),
        }
    }

    pub fn recorded_on(&self) -> NaiveDate {
        self.recorded_at.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::calculate_all;
    use crate::product::default_catalog;
    use crate::values::{MonetaryAmount, TermMonths};
    use rust_decimal_macros::dec;

    #[test]
    fn test_payload_mapping() {
        let product = &default_catalog()[0];
        let value = MonetaryAmount::loan_value(dec!(1000.00)).unwrap();
        let term = TermMonths::new(3).unwrap();
        let results = calculate_all(value, product.monthly_rate, term);
        let date = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        let simulation = Simulation::new(product, value, term, date, results);

        let payload = SimulationPayload::from(&simulation);
        assert_eq!(payload.simulation_id, simulation.id());
        assert_eq!(payload.product_code, 1);
        assert_eq!(payload.term_months, 3);
        assert_eq!(payload.results.len(), 2);
        assert_eq!(payload.results[0].system, "SAC");
        assert_eq!(payload.results[1].installments.len(), 3);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["productCode"], 1);
        assert_eq!(json["requestedValue"], "1000.00");
        assert_eq!(json["referenceDate"], "2025-08-20");
        assert!(json["results"][0]["installments"][0]["amortization"].is_string());
    }

    #[test]
    fn test_metric_json_fields() {
        let metric = RequestMetric::new("simulations", "POST /simulations", 42, true, 201);
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["apiName"], "simulations");
        assert_eq!(json["elapsedMs"], 42);
        assert_eq!(json["statusCode"], 201);
        assert_eq!(metric.recorded_on(), metric.recorded_at.date_naive());
    }
}
