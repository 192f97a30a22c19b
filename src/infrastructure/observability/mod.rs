//! Observability infrastructure - Tracing and Prometheus metrics

mod config;
mod metrics;
mod tracing_setup;

pub use config::{MetricsConfig, ObservabilityConfig, TracingConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_chain_execution, record_http_request,
    record_provider_attempt, PrometheusMetrics, CHAIN_DURATION_SECONDS, CHAIN_EXECUTIONS_TOTAL,
    PROVIDER_ATTEMPTS_TOTAL,
};
pub use tracing_setup::{init_tracing, shutdown_tracing};
