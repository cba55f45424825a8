//! Prometheus counters for published domain events.
//!
//! All metrics follow the naming convention `ge_<metric>_<unit>`.
//! Each component owns an [`EventMetrics`] registry; [`MeteredSink`] counts
//! every event on its way to the wrapped sink.

use crate::TelemetryError;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use shared_types::{EventKind, EventSink};
use std::sync::Arc;

#[derive(Clone)]
pub struct EventMetrics {
    registry: Registry,
    events: IntCounterVec,
}

impl EventMetrics {
    pub fn new() -> Result<Self, TelemetryError> {
        let registry = Registry::new();
        let events = IntCounterVec::new(
            Opts::new("ge_events_published_total", "Domain events published"),
            &["component", "event"],
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        registry
            .register(Box::new(events.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        Ok(Self { registry, events })
    }

    pub fn record(&self, component: &str, event: &str) {
        self.events.with_label_values(&[component, event]).inc();
    }

    pub fn count(&self, component: &str, event: &str) -> u64 {
        self.events.with_label_values(&[component, event]).get()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes every metric in the Prometheus text format.
    pub fn encode(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
    }
}

/// Counts events by kind, then forwards them.
pub struct MeteredSink<E> {
    component: &'static str,
    metrics: EventMetrics,
    inner: Arc<dyn EventSink<E>>,
}

impl<E> MeteredSink<E> {
    pub fn new(component: &'static str, metrics: EventMetrics, inner: Arc<dyn EventSink<E>>) -> Self {
        Self {
            component,
            metrics,
            inner,
        }
    }
}

impl<E: EventKind + Send> EventSink<E> for MeteredSink<E> {
    fn publish(&self, event: E) {
        self.metrics.record(self.component, event.kind());
        self.inner.publish(event);
    }
}
