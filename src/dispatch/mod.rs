//! Best-effort side notifications: simulation events and request telemetry

mod dispatcher;
mod payload;
mod sinks;
mod telemetry;

pub use dispatcher::Dispatcher;
pub use payload::{InstallmentPayload, RequestMetric, SchedulePayload, SimulationPayload};
pub use sinks::{LogEventSink, LogMetricsSink};
pub use telemetry::{EndpointTelemetry, TelemetryAggregator};
