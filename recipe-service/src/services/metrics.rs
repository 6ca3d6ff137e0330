//! Prometheus export for recipe-service.
//!
//! HTTP request metrics are recorded by the shared middleware; this module
//! adds persistence and upstream counters and renders everything for
//! `/metrics`.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global recorder. Later calls are no-ops, so tests can spawn
/// several applications in one process.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
            tracing::info!("Prometheus metrics initialized");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
        }
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count a failed datastore write.
pub fn record_persistence_failure(table: &'static str, reason: &'static str) {
    counter!(
        "recipe_persistence_failures_total",
        "table" => table,
        "reason" => reason
    )
    .increment(1);
}

/// Count an upstream call by service and outcome (`ok`, `error`, `timeout`).
pub fn record_upstream_call(service: &'static str, outcome: &'static str) {
    counter!(
        "recipe_upstream_calls_total",
        "service" => service,
        "outcome" => outcome
    )
    .increment(1);
}
