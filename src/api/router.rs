//! Router assembly

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::metrics_middleware;
use super::state::AppState;
use super::v1;

/// Stateless router with the liveness endpoints only
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::availability::mock::StaticAvailabilityChecker;
    use crate::domain::{
        invoker_fn, ChainConfig, ChainExecutor, DomainError, ModelCatalog, ProviderDescriptor,
        ProviderRegistry, RequiredConfig,
    };
    use crate::infrastructure::invoker::GenerationRequest;
    use crate::infrastructure::services::GenerationService;

    #[derive(Debug)]
    struct DeclaredModels;

    #[async_trait]
    impl ModelCatalog for DeclaredModels {
        async fn list_models(&self, provider: &ProviderDescriptor) -> Result<Vec<String>, DomainError> {
            Ok(provider.models().to_vec())
        }
    }

    fn app(available: &[&str]) -> Router {
        let images = ChainConfig::new(
            "image-generation",
            vec![
                ProviderDescriptor::new("fal", RequiredConfig::credentials(["FAL_KEY"]))
                    .with_priority(1)
                    .with_max_attempts(1)
                    .with_models(["flux-dev"]),
                ProviderDescriptor::new("replicate", RequiredConfig::credentials(["REPLICATE_API_TOKEN"]))
                    .with_priority(2)
                    .with_max_attempts(1),
            ],
        )
        .unwrap();
        let speech = ChainConfig::new(
            "text-to-speech",
            vec![ProviderDescriptor::new("gpu-worker", RequiredConfig::reachable("GPU_WORKER_URL"))
                .with_max_attempts(1)],
        )
        .unwrap();

        let registry = Arc::new(ProviderRegistry::new([images, speech]).unwrap());
        let executor = Arc::new(ChainExecutor::new(
            registry,
            Arc::new(StaticAvailabilityChecker::new(available.iter().copied())),
        ));

        let invoker = invoker_fn(|provider: String, request: GenerationRequest| async move {
            match provider.as_str() {
                "replicate" => Ok(json!({"output": request.payload["prompt"]})),
                _ => Err(DomainError::provider(provider, "HTTP 500")),
            }
        });

        let service = GenerationService::new(executor, Arc::new(invoker), Arc::new(DeclaredModels));

        create_router_with_state(AppState::new(Arc::new(service)))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };

        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_and_live() {
        let (status, body) = send(create_router(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, _) = send(create_router(), get("/live")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_features() {
        let (status, body) = send(app(&[]), get("/v1/features")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["feature"], "image-generation");
        assert_eq!(body["data"][0]["providers"], json!(["fal", "replicate"]));
        assert_eq!(body["data"][1]["feature"], "text-to-speech");
    }

    #[tokio::test]
    async fn test_list_providers() {
        let (status, body) = send(app(&["replicate"]), get("/v1/features/image-generation/providers")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["providers"][0]["name"], "fal");
        assert_eq!(body["providers"][0]["available"], false);
        assert_eq!(body["providers"][1]["available"], true);
    }

    #[tokio::test]
    async fn test_list_models() {
        let (status, body) = send(app(&[]), get("/v1/features/image-generation/models")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["providers"][0]["models"], json!(["flux-dev"]));
    }

    #[tokio::test]
    async fn test_unknown_feature_is_404() {
        let (status, body) = send(app(&["fal"]), post("/v1/features/video/generate", json!({}))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
        assert_eq!(body["error"]["param"], "feature");
    }

    #[tokio::test]
    async fn test_generate_falls_back() {
        let (status, body) = send(
            app(&["fal", "replicate"]),
            post("/v1/features/image-generation/generate", json!({"prompt": "a fox"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["provider"], "replicate");
        assert_eq!(body["result"]["output"], "a fox");
        assert_eq!(body["attempted_providers"], json!(["fal", "replicate"]));
        assert_eq!(body["attempts"].as_array().unwrap().len(), 2);
        assert_eq!(body["attempts"][0]["success"], false);
    }

    #[tokio::test]
    async fn test_generate_without_providers_is_503() {
        let (status, body) = send(
            app(&[]),
            post("/v1/features/text-to-speech/generate", json!({"text": "hello"})),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
        assert_eq!(
            body["final_error"],
            "No providers configured for feature 'text-to-speech'"
        );
        assert_eq!(body["attempted_providers"], json!([]));
    }

    #[tokio::test]
    async fn test_generate_all_failed_is_503() {
        let (status, body) = send(
            app(&["fal"]),
            post("/v1/features/image-generation/generate", json!({"prompt": "a fox"})),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["final_error"]
            .as_str()
            .unwrap()
            .starts_with("All providers failed: fal"));
    }

    #[tokio::test]
    async fn test_generate_rejects_non_object_body() {
        let (status, body) = send(
            app(&["fal"]),
            post("/v1/features/image-generation/generate", json!(["a fox"])),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_ready_reports_degraded() {
        let (status, body) = send(app(&["fal"]), get("/ready")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"][0]["available_providers"], json!(["fal"]));
    }

    #[tokio::test]
    async fn test_ready_unavailable_without_providers() {
        let (status, body) = send(app(&[]), get("/ready")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
    }
}
