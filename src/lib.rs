//! PMP Generation Gateway
//!
//! Routes generation requests (images, speech, audio) through per-feature
//! provider chains:
//! - Providers are tried in priority order, skipping unconfigured ones
//! - Self-hosted backends are probed for reachability before use
//! - Each provider gets bounded retries with exponential backoff
//! - Every attempt is recorded and failures are aggregated

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::{AvailabilityChecker, ChainExecutor, SettingsSource, ShutdownSignal};
use infrastructure::{
    availability::{CachedAvailabilityChecker, ConfiguredAvailabilityChecker, HttpHealthProbe},
    catalog::{HttpModelCatalog, ModelCatalogCache},
    http_client::HttpClient,
    invoker::HttpGenerationInvoker,
    registry::{builtin_registry, load_registry, RegistryDefinition},
    services::GenerationService,
    settings::{EnvSettings, LayeredSettings},
};

/// Registry file from the configuration, or the built-in definition
pub fn load_registry_definition(config: &AppConfig) -> anyhow::Result<RegistryDefinition> {
    let definition = match &config.providers.registry_file {
        Some(path) => load_registry(path)?,
        None => builtin_registry()?,
    };

    Ok(definition)
}

/// Wire the generation service from the configuration.
///
/// Settings resolve from the environment first, then from the registry
/// file's `[settings]` table.
pub fn create_generation_service(
    config: &AppConfig,
    shutdown: ShutdownSignal,
) -> anyhow::Result<GenerationService> {
    let RegistryDefinition {
        registry,
        endpoints,
        settings: file_settings,
    } = load_registry_definition(config)?;

    info!(
        features = registry.len(),
        endpoints = endpoints.len(),
        "Provider registry loaded"
    );

    let settings: Arc<dyn SettingsSource> = Arc::new(
        LayeredSettings::new()
            .with_layer(Arc::new(EnvSettings::new()))
            .with_layer(Arc::new(file_settings)),
    );

    let checker = ConfiguredAvailabilityChecker::new(settings.clone(), Arc::new(HttpHealthProbe::new()))
        .with_default_probe_timeout(config.providers.probe_timeout());

    let availability: Arc<dyn AvailabilityChecker> = match config.providers.availability_cache_ttl() {
        Some(ttl) => Arc::new(CachedAvailabilityChecker::new(checker, ttl)),
        None => Arc::new(checker),
    };

    let executor = ChainExecutor::new(Arc::new(registry), availability).with_shutdown(shutdown);

    let client = Arc::new(HttpClient::with_timeout(config.providers.invoke_timeout())?);

    let invoker = endpoints.into_iter().fold(
        HttpGenerationInvoker::new(client.clone(), settings.clone()),
        |invoker, definition| {
            invoker.with_endpoint(definition.feature, definition.provider, definition.endpoint)
        },
    );

    let catalog = ModelCatalogCache::new(
        HttpModelCatalog::new(client, settings),
        config.providers.catalog_cache_ttl(),
    );

    Ok(GenerationService::new(
        Arc::new(executor),
        Arc::new(invoker),
        Arc::new(catalog),
    ))
}

/// Create the application state
pub fn create_app_state(config: &AppConfig, shutdown: ShutdownSignal) -> anyhow::Result<AppState> {
    let service = create_generation_service(config, shutdown)?;
    Ok(AppState::new(Arc::new(service)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_with_builtin_registry() {
        let state = create_app_state(&AppConfig::default(), ShutdownSignal::never()).unwrap();

        assert!(state.generation_service.registry().contains("text-to-speech"));
        assert!(state.generation_service.registry().contains("image-generation"));
    }

    #[test]
    fn test_missing_registry_file_fails() {
        let mut config = AppConfig::default();
        config.providers.registry_file = Some("/nonexistent/registry.toml".to_string());

        let err = load_registry_definition(&config).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }
}
