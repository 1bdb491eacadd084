//! Detached best-effort delivery to the event and metrics sinks
//!
//! Tasks are spawned on the runtime captured at construction, so they outlive the
//! request that scheduled them and ignore its cancellation. Sink failures are logged
//! and dropped.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use super::{RequestMetric, SimulationPayload};
use crate::ports::{EventSink, MetricsSink};
use crate::simulation::Simulation;

/// Fire-and-forget dispatcher
#[derive(Clone)]
pub struct Dispatcher {
    runtime: Handle,
    events: Arc<dyn EventSink>,
    metrics: Arc<dyn MetricsSink>,
    in_flight: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

/// Decrements the in-flight count when a task finishes, panicked or not
struct InFlightGuard {
    in_flight: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.idle.notify_waiters();
        }
    }
}

impl Dispatcher {
    /// Dispatcher spawning onto `runtime`
    pub fn new(runtime: Handle, events: Arc<dyn EventSink>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            runtime,
            events,
            metrics,
            in_flight: Arc::new(AtomicUsize::new(0)),
            idle: Arc::new(Notify::new()),
        }
    }

    /// Dispatcher bound to the runtime the caller is running on
    pub fn current(events: Arc<dyn EventSink>, metrics: Arc<dyn MetricsSink>) -> anyhow::Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| anyhow::anyhow!("dispatcher needs a tokio runtime: {}", e))?;
        Ok(Self::new(runtime, events, metrics))
    }

    /// Publish a persisted simulation without waiting for the sink
    pub fn publish_simulation(&self, simulation: &Simulation) -> JoinHandle<()> {
        let payload = SimulationPayload::from(simulation);
        let events = Arc::clone(&self.events);

        self.spawn(async move {
            match events.publish(&payload).await {
                Ok(()) => log::debug!("Published simulation {}", payload.simulation_id),
                Err(e) => log::warn!(
                    "Discarding failed publish of simulation {}: {:#}",
                    payload.simulation_id,
                    e
                ),
            }
        })
    }

    /// Record request telemetry without waiting for the sink
    pub fn record_request_metric(&self, metric: RequestMetric) -> JoinHandle<()> {
        let metrics = Arc::clone(&self.metrics);

        self.spawn(async move {
            if let Err(e) = metrics.record_request_metric(&metric).await {
                log::warn!(
                    "Discarding failed metric for {} {}: {:#}",
                    metric.api_name,
                    metric.endpoint,
                    e
                );
            }
        })
    }

    /// Number of dispatch tasks not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Wait up to `wait` for in-flight dispatches to finish
    ///
    /// Returns false if tasks were still running at the deadline; those may be lost
    /// when the process exits.
    pub async fn flush(&self, wait: Duration) -> bool {
        let drained = async {
            loop {
                let notified = self.idle.notified();
                if self.in_flight() == 0 {
                    return;
                }
                notified.await;
            }
        };

        let done = tokio::time::timeout(wait, drained).await.is_ok();
        if !done {
            log::warn!("{} dispatch task(s) still in flight after {:?}", self.in_flight(), wait);
        }
        done
    }

    fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let guard = InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
            idle: Arc::clone(&self.idle),
        };

        self.runtime.spawn(async move {
            let _guard = guard;
            task.await;
        })
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("in_flight", &self.in_flight())
            .finish()
    }
}
