//! Prometheus metrics for recipe-service.
//!
//! HTTP request metrics come from the `metrics` facade (see
//! `service_core::middleware::metrics`) and are rendered by the Prometheus
//! recorder; generation metrics live in a dedicated `prometheus` registry.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static RECIPE_GENERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static GENAI_PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize metrics. Later calls are no-ops.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder"),
    }

    let registry = Registry::new();

    let generations = IntCounterVec::new(
        Opts::new(
            "recipe_generations_total",
            "Recipe generation attempts by outcome",
        ),
        &["outcome"],
    )
    .expect("Failed to create recipe_generations_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "genai_provider_latency_seconds",
            "Latency of text generation provider calls",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["model"],
    )
    .expect("Failed to create genai_provider_latency_seconds metric");

    registry
        .register(Box::new(generations.clone()))
        .expect("Failed to register recipe_generations_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register genai_provider_latency_seconds");

    let _ = RECIPE_GENERATIONS_TOTAL.set(generations);
    let _ = GENAI_PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = REGISTRY.set(registry);
}

/// Render all metrics in the Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    if let Some(registry) = REGISTRY.get() {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if encoder.encode(&registry.gather(), &mut buffer).is_ok() {
            output.push_str(&String::from_utf8_lossy(&buffer));
        }
    } else {
        output.push_str("# Metrics registry not initialized\n");
    }

    output
}

/// Count a generation attempt. `outcome` is one of
/// `success`, `invalid`, `empty`, `blocked`, `error`.
pub fn record_generation(outcome: &str) {
    if let Some(counter) = RECIPE_GENERATIONS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

pub fn record_provider_latency(model: &str, elapsed: Duration) {
    if let Some(histogram) = GENAI_PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[model])
            .observe(elapsed.as_secs_f64());
    }
}
