//! v1 API endpoints

pub mod features;
pub mod generate;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/features", get(features::list_features))
        .route("/features/{feature}/providers", get(features::list_providers))
        .route("/features/{feature}/models", get(features::list_models))
        .route("/features/{feature}/generate", post(generate::generate))
}
