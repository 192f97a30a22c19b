//! Generation endpoint

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

/// POST /v1/features/{feature}/generate
///
/// The body is forwarded to providers as-is. Responds 200 with the chain
/// result when a provider succeeded, 503 with the same shape when none did.
pub async fn generate(
    State(state): State<AppState>,
    Path(feature): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    if !payload.is_object() {
        return Err(ApiError::bad_request("Request body must be a JSON object").with_param("body"));
    }

    debug!(feature = %feature, "Generation requested");

    let result = state.generation_service.generate(&feature, payload).await?;

    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((status, Json(result)).into_response())
}
