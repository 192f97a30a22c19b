//! Feature discovery endpoints

use axum::extract::{Path, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, FeatureSummary, FeaturesResponse, Json, ModelsResponse, ProvidersResponse,
};

/// GET /v1/features
pub async fn list_features(State(state): State<AppState>) -> Json<FeaturesResponse> {
    let data = state
        .generation_service
        .registry()
        .chains()
        .into_iter()
        .map(FeatureSummary::from)
        .collect();

    Json(FeaturesResponse {
        object: "list",
        data,
    })
}

/// GET /v1/features/{feature}/providers
pub async fn list_providers(
    State(state): State<AppState>,
    Path(feature): Path<String>,
) -> Result<Json<ProvidersResponse>, ApiError> {
    debug!(feature = %feature, "Checking provider availability");

    let providers = state.generation_service.provider_statuses(&feature).await?;

    Ok(Json(ProvidersResponse { feature, providers }))
}

/// GET /v1/features/{feature}/models
pub async fn list_models(
    State(state): State<AppState>,
    Path(feature): Path<String>,
) -> Result<Json<ModelsResponse>, ApiError> {
    debug!(feature = %feature, "Listing models");

    let providers = state.generation_service.list_models(&feature).await?;

    Ok(Json(ModelsResponse { feature, providers }))
}
