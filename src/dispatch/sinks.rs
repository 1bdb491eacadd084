//! Sinks that write to the log, used when no broker or telemetry store is wired in

use async_trait::async_trait;

use super::{RequestMetric, SimulationPayload};
use crate::ports::{EventSink, MetricsSink};

/// Logs each payload as a JSON line at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

#[async_trait]
impl EventSink for LogEventSink {
    async fn publish(&self, payload: &SimulationPayload) -> anyhow::Result<()> {
        let json = serde_json::to_string(payload)?;
        log::info!(target: "credit_simulation::events", "{}", json);
        Ok(())
    }
}

/// Logs each metric as a JSON line at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMetricsSink;

#[async_trait]
impl MetricsSink for LogMetricsSink {
    async fn record_request_metric(&self, metric: &RequestMetric) -> anyhow::Result<()> {
        let json = serde_json::to_string(metric)?;
        log::debug!(target: "credit_simulation::metrics", "{}", json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::calculate_all;
    use crate::product::default_catalog;
    use crate::simulation::Simulation;
    use crate::values::{MonetaryAmount, TermMonths};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_log_event_sink_publishes_payload() {
        let product = &default_catalog()[0];
        let value = MonetaryAmount::loan_value(dec!(2500.00)).unwrap();
        let term = TermMonths::new(10).unwrap();
        let results = calculate_all(value, product.monthly_rate, term);
        let simulation = Simulation::new(product, value, term, NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(), results);

        let payload = SimulationPayload::from(&simulation);
        assert!(LogEventSink.publish(&payload).await.is_ok());
    }

    #[tokio::test]
    async fn test_log_metrics_sink_records_metric() {
        let metric = RequestMetric::new("simulations", "POST /simulations", 12, true, 201);
        assert!(LogMetricsSink.record_request_metric(&metric).await.is_ok());
    }
}
