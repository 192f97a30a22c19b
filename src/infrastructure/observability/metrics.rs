//! Prometheus metrics for chain executions and the HTTP surface

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;

pub const CHAIN_EXECUTIONS_TOTAL: &str = "generation_chain_executions_total";
pub const CHAIN_DURATION_SECONDS: &str = "generation_chain_duration_seconds";
pub const PROVIDER_ATTEMPTS_TOTAL: &str = "generation_provider_attempts_total";

/// Longest path label kept; unmatched paths are the only unbounded input
const MAX_PATH_LABEL_LEN: usize = 50;

/// Handle serving the Prometheus exposition
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Install the global Prometheus recorder
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    let builder = match PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full(CHAIN_DURATION_SECONDS.to_string()),
        &config.chain_duration_buckets,
    ) {
        Ok(builder) => builder,
        Err(e) => {
            tracing::error!("Invalid chain duration buckets: {}", e);
            return None;
        }
    };

    match builder.install_recorder() {
        Ok(handle) => {
            gauge!("generation_gateway_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Router exposing the metrics at `path`
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "failure" }
}

/// Record one finished chain execution. `provider` is the winner, or
/// `"none"` when the chain failed.
pub fn record_chain_execution(feature: &str, provider: Option<&str>, success: bool, duration: Duration) {
    let labels = [
        ("feature", feature.to_string()),
        ("provider", provider.unwrap_or("none").to_string()),
        ("outcome", outcome(success).to_string()),
    ];

    counter!(CHAIN_EXECUTIONS_TOTAL, &labels).increment(1);
    histogram!(CHAIN_DURATION_SECONDS, &labels[..1]).record(duration.as_secs_f64());
}

/// Record a single attempt against a provider
pub fn record_provider_attempt(feature: &str, provider: &str, success: bool) {
    let labels = [
        ("feature", feature.to_string()),
        ("provider", provider.to_string()),
        ("outcome", outcome(success).to_string()),
    ];

    counter!(PROVIDER_ATTEMPTS_TOTAL, &labels).increment(1);
}

/// Record an HTTP request metric. `path` is the matched route template when
/// one exists.
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path_label(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

fn path_label(path: &str) -> String {
    path.chars().take(MAX_PATH_LABEL_LEN).collect()
}
