//! Generation service - runs feature chains and reports on them

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::domain::{
    ChainExecutionResult, ChainExecutor, DomainError, GenerationInvoker, ModelCatalog,
    ProviderRegistry, ProviderStatus,
};
use crate::infrastructure::invoker::GenerationRequest;
use crate::infrastructure::observability::{record_chain_execution, record_provider_attempt};

/// Models one provider offers for a feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderModels {
    pub provider: String,
    pub models: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Front door for generation requests.
///
/// Wraps the chain executor with the invoker and model catalog used by the
/// HTTP and CLI surfaces, and records metrics for every execution.
pub struct GenerationService {
    executor: Arc<ChainExecutor>,
    invoker: Arc<dyn GenerationInvoker<GenerationRequest, Value>>,
    catalog: Arc<dyn ModelCatalog>,
}

impl fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationService")
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl GenerationService {
    pub fn new(
        executor: Arc<ChainExecutor>,
        invoker: Arc<dyn GenerationInvoker<GenerationRequest, Value>>,
        catalog: Arc<dyn ModelCatalog>,
    ) -> Self {
        Self {
            executor,
            invoker,
            catalog,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.executor.registry()
    }

    /// Run the chain for `feature` with the given payload
    #[instrument(skip(self, payload))]
    pub async fn generate(
        &self,
        feature: &str,
        payload: Value,
    ) -> Result<ChainExecutionResult<Value>, DomainError> {
        let request = GenerationRequest::new(feature, payload);
        let started = Instant::now();

        let result = self
            .executor
            .execute_chain(feature, &request, self.invoker.as_ref())
            .await?;

        for attempt in &result.attempts {
            record_provider_attempt(feature, attempt.provider(), attempt.success());
        }

        record_chain_execution(
            feature,
            result.provider.as_deref(),
            result.success,
            started.elapsed(),
        );

        if result.success {
            info!(
                provider = result.provider.as_deref().unwrap_or_default(),
                attempts = result.attempts.len(),
                "Generation completed"
            );
        } else if result.is_unconfigured() {
            warn!("Generation skipped, no provider is configured");
        } else if result.cancelled {
            warn!(attempted = ?result.attempted_providers, "Generation cancelled by shutdown");
        } else {
            warn!(
                attempted = ?result.attempted_providers,
                error = result.final_error.as_deref().unwrap_or_default(),
                "Generation failed"
            );
        }

        Ok(result)
    }

    /// Availability of every provider registered for `feature`
    pub async fn provider_statuses(&self, feature: &str) -> Result<Vec<ProviderStatus>, DomainError> {
        self.executor.provider_statuses(feature).await
    }

    /// Availability of every registered feature's providers
    pub async fn all_statuses(&self) -> Vec<(String, Vec<ProviderStatus>)> {
        let features: Vec<String> = self
            .registry()
            .features()
            .into_iter()
            .map(str::to_string)
            .collect();

        let statuses = join_all(features.iter().map(|f| self.provider_statuses(f))).await;

        features
            .into_iter()
            .zip(statuses)
            .filter_map(|(feature, statuses)| statuses.ok().map(|s| (feature, s)))
            .collect()
    }

    /// Models offered by each provider of `feature`; lookup failures are
    /// reported per provider instead of failing the listing
    pub async fn list_models(&self, feature: &str) -> Result<Vec<ProviderModels>, DomainError> {
        let chain = self.registry().get_chain(feature)?;

        let lookups = join_all(
            chain
                .providers()
                .iter()
                .map(|provider| self.catalog.list_models(provider)),
        )
        .await;

        Ok(chain
            .providers()
            .iter()
            .zip(lookups)
            .map(|(provider, lookup)| match lookup {
                Ok(models) => ProviderModels {
                    provider: provider.name().to_string(),
                    models,
                    error: None,
                },
                Err(e) => ProviderModels {
                    provider: provider.name().to_string(),
                    models: Vec::new(),
                    error: Some(e.to_string()),
                },
            })
            .collect())
    }
}
