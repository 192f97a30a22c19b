//! Health check endpoints for Kubernetes probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<FeatureCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Readiness of one feature: how many of its providers are usable
#[derive(Serialize, Debug)]
pub struct FeatureCheck {
    pub feature: String,
    pub status: HealthStatus,
    pub available_providers: Vec<String>,
}

/// Liveness with version, used by `/health`
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness: every feature with at least one available provider is healthy.
///
/// Some features without providers make the service degraded; it only
/// reports unavailable when no feature can be served at all.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();

    let checks: Vec<FeatureCheck> = state
        .generation_service
        .all_statuses()
        .await
        .into_iter()
        .map(|(feature, providers)| {
            let available_providers: Vec<String> = providers
                .into_iter()
                .filter(|p| p.available)
                .map(|p| p.name)
                .collect();

            FeatureCheck {
                feature,
                status: if available_providers.is_empty() {
                    HealthStatus::Unhealthy
                } else {
                    HealthStatus::Healthy
                },
                available_providers,
            }
        })
        .collect();

    let overall = overall_status(&checks);

    let response = HealthResponse {
        status: overall,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match overall {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    (status_code, Json(response))
}

fn overall_status(checks: &[FeatureCheck]) -> HealthStatus {
    let healthy = checks
        .iter()
        .filter(|c| c.status == HealthStatus::Healthy)
        .count();

    if healthy == checks.len() && healthy > 0 {
        HealthStatus::Healthy
    } else if healthy > 0 {
        HealthStatus::Degraded
    } else {
        HealthStatus::Unhealthy
    }
}

/// Liveness check
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
