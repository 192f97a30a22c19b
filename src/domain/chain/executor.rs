//! Chain executor - runs a feature's provider chain with retry and fallback

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{retry, AttemptRecord, ChainExecutionResult, GenerationInvoker, ShutdownSignal};
use crate::domain::{
    AvailabilityChecker, ChainConfig, DomainError, ProviderDescriptor, ProviderRegistry,
};

/// Availability of one provider in a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub priority: i32,
    pub available: bool,
}

/// Orchestrates provider chains.
///
/// Holds only read-only collaborators, so a single instance can serve any
/// number of concurrent executions.
pub struct ChainExecutor {
    registry: Arc<ProviderRegistry>,
    availability: Arc<dyn AvailabilityChecker>,
    shutdown: ShutdownSignal,
}

impl std::fmt::Debug for ChainExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainExecutor")
            .field("features", &self.registry.features())
            .field("availability", &self.availability)
            .finish()
    }
}

impl ChainExecutor {
    pub fn new(registry: Arc<ProviderRegistry>, availability: Arc<dyn AvailabilityChecker>) -> Self {
        Self {
            registry,
            availability,
            shutdown: ShutdownSignal::never(),
        }
    }

    /// Let backoff delays be interrupted by the given shutdown signal
    pub fn with_shutdown(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Execute the chain registered for `feature`.
    ///
    /// Only an unknown feature is returned as `Err`; every provider failure is
    /// folded into the returned [`ChainExecutionResult`].
    pub async fn execute_chain<Req, T, I>(
        &self,
        feature: &str,
        request: &Req,
        invoker: &I,
    ) -> Result<ChainExecutionResult<T>, DomainError>
    where
        Req: Send + Sync,
        T: Send,
        I: GenerationInvoker<Req, T> + ?Sized,
    {
        let chain = self.registry.get_chain(feature)?;
        let available = self.available_providers(chain).await;

        if available.is_empty() {
            warn!(feature = feature, "No providers configured");
            return Ok(ChainExecutionResult::no_providers(feature));
        }

        let mut attempted_providers = Vec::with_capacity(available.len());
        let mut attempts = Vec::new();
        let mut last_error = None;

        for provider in available {
            if self.shutdown.is_triggered() {
                return Ok(cancelled_result(attempted_providers, attempts));
            }

            let name = provider.name();
            attempted_providers.push(name.to_string());

            debug!(feature = feature, provider = name, "Attempting provider");

            let outcome = retry(name, provider.retry_policy(), &self.shutdown, || {
                invoker.invoke(name, request)
            })
            .await;

            if let Some(error) = outcome.last_error() {
                last_error = Some(error.to_string());
            }

            let cancelled = outcome.cancelled;
            attempts.extend(outcome.attempts);

            if let Some(value) = outcome.value {
                info!(
                    feature = feature,
                    provider = name,
                    attempts = attempts.len(),
                    "Chain execution succeeded"
                );

                return Ok(ChainExecutionResult::succeeded(
                    name,
                    value,
                    attempted_providers,
                    attempts,
                ));
            }

            if cancelled {
                return Ok(cancelled_result(attempted_providers, attempts));
            }

            warn!(
                feature = feature,
                provider = name,
                max_attempts = provider.max_attempts(),
                "Provider exhausted its retries, falling back"
            );
        }

        let final_error = format!(
            "All providers failed: {} (last error: {})",
            attempted_providers.join(", "),
            last_error.as_deref().unwrap_or("unknown error")
        );

        warn!(feature = feature, error = %final_error, "Chain execution failed");

        Ok(ChainExecutionResult::failed(
            final_error,
            attempted_providers,
            attempts,
        ))
    }

    /// Availability of every provider registered for `feature`, in priority order
    pub async fn provider_statuses(&self, feature: &str) -> Result<Vec<ProviderStatus>, DomainError> {
        let chain = self.registry.get_chain(feature)?;
        let results = self.check_all(chain).await;

        Ok(chain
            .providers()
            .iter()
            .zip(results)
            .map(|(provider, available)| ProviderStatus {
                name: provider.name().to_string(),
                priority: provider.priority(),
                available,
            })
            .collect())
    }

    /// Providers that are currently usable, preserving priority order
    async fn available_providers<'a>(&self, chain: &'a ChainConfig) -> Vec<&'a ProviderDescriptor> {
        let results = self.check_all(chain).await;

        chain
            .providers()
            .iter()
            .zip(results)
            .filter_map(|(provider, available)| {
                if !available {
                    debug!(
                        feature = chain.feature(),
                        provider = provider.name(),
                        "Skipping unavailable provider"
                    );
                }

                available.then_some(provider)
            })
            .collect()
    }

    /// Checks run concurrently; `join_all` keeps results in chain order
    async fn check_all(&self, chain: &ChainConfig) -> Vec<bool> {
        join_all(
            chain
                .providers()
                .iter()
                .map(|provider| self.availability.check_availability(provider)),
        )
        .await
    }
}

fn cancelled_result<T>(
    attempted_providers: Vec<String>,
    attempts: Vec<AttemptRecord>,
) -> ChainExecutionResult<T> {
    let error = if attempted_providers.is_empty() {
        DomainError::cancelled("shutdown before any provider was attempted")
    } else {
        DomainError::cancelled(format!(
            "shutdown after attempting: {}",
            attempted_providers.join(", ")
        ))
    };

    ChainExecutionResult::cancelled(error.to_string(), attempted_providers, attempts)
}
