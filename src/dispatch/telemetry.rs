//! In-memory request telemetry with per-endpoint daily rollups

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::RequestMetric;
use crate::ports::MetricsSink;

/// Rollup for one (api, endpoint) pair on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointTelemetry {
    pub api_name: String,
    pub endpoint: String,
    pub request_count: u64,
    pub average_ms: f64,
    pub min_ms: u64,
    pub max_ms: u64,
    /// Percentage of successful requests, 0 to 100
    pub success_rate: f64,
}

/// Metrics sink that keeps every metric and summarises on demand
#[derive(Debug, Default)]
pub struct TelemetryAggregator {
    metrics: RwLock<Vec<RequestMetric>>,
}

impl TelemetryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, metric: RequestMetric) {
        self.metrics
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(metric);
    }

    /// Per-endpoint rollups for metrics recorded on `date`, ordered by api then endpoint
    pub fn snapshot(&self, date: NaiveDate) -> Vec<EndpointTelemetry> {
        let metrics = self.metrics.read().unwrap_or_else(PoisonError::into_inner);

        let mut groups: BTreeMap<(&str, &str), Vec<&RequestMetric>> = BTreeMap::new();
        for metric in metrics.iter().filter(|m| m.recorded_on() == date) {
            groups
                .entry((metric.api_name.as_str(), metric.endpoint.as_str()))
                .or_default()
                .push(metric);
        }

        groups
            .into_iter()
            .map(|((api_name, endpoint), group)| {
                let count = group.len() as u64;
                let total_ms: u64 = group.iter().map(|m| m.elapsed_ms).sum();
                let successes = group.iter().filter(|m| m.success).count() as f64;

                EndpointTelemetry {
                    api_name: api_name.to_string(),
                    endpoint: endpoint.to_string(),
                    request_count: count,
                    average_ms: total_ms as f64 / count as f64,
                    min_ms: group.iter().map(|m| m.elapsed_ms).min().unwrap_or(0),
                    max_ms: group.iter().map(|m| m.elapsed_ms).max().unwrap_or(0),
                    success_rate: successes / count as f64 * 100.0,
                }
            })
            .collect()
    }
}

#[async_trait]
impl MetricsSink for TelemetryAggregator {
    async fn record_request_metric(&self, metric: &RequestMetric) -> anyhow::Result<()> {
        self.record(metric.clone());
        Ok(())
    }
}
