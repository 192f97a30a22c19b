//! Availability checker evaluating declarative provider requirements

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::{
    AvailabilityChecker, HealthCheck, HealthProbe, ProviderDescriptor, RequiredConfig,
    SettingsSource, DEFAULT_PROBE_TIMEOUT_MS,
};

/// Checks providers against settings and, for self-hosted backends, a health probe
#[derive(Debug)]
pub struct ConfiguredAvailabilityChecker {
    settings: Arc<dyn SettingsSource>,
    probe: Arc<dyn HealthProbe>,
    default_probe_timeout: Duration,
}

impl ConfiguredAvailabilityChecker {
    pub fn new(settings: Arc<dyn SettingsSource>, probe: Arc<dyn HealthProbe>) -> Self {
        Self {
            settings,
            probe,
            default_probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }

    /// Timeout for reachability providers that declare no health check
    pub fn with_default_probe_timeout(mut self, timeout: Duration) -> Self {
        self.default_probe_timeout = timeout;
        self
    }

    fn has_credentials(&self, provider: &ProviderDescriptor, keys: &[String]) -> bool {
        match keys.iter().find(|key| !self.settings.is_set(key)) {
            Some(missing) => {
                debug!(provider = provider.name(), setting = %missing, "Provider missing setting");
                false
            }
            None => true,
        }
    }

    async fn is_reachable(&self, provider: &ProviderDescriptor, base_url_key: &str) -> bool {
        let Some(base_url) = self.settings.get_non_empty(base_url_key) else {
            debug!(provider = provider.name(), setting = %base_url_key, "Provider base URL not set");
            return false;
        };

        let check = provider.health_check().cloned().unwrap_or_else(|| {
            HealthCheck::default().with_timeout_ms(self.default_probe_timeout.as_millis() as u64)
        });

        match timeout(check.timeout(), self.probe.probe(&base_url, &check)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                debug!(provider = provider.name(), error = %e, "Health probe failed");
                false
            }
            Err(_) => {
                debug!(
                    provider = provider.name(),
                    timeout_ms = check.timeout_ms,
                    "Health probe timed out"
                );
                false
            }
        }
    }
}

#[async_trait]
impl AvailabilityChecker for ConfiguredAvailabilityChecker {
    async fn check_availability(&self, provider: &ProviderDescriptor) -> bool {
        match provider.required_config() {
            RequiredConfig::Credentials { keys } => self.has_credentials(provider, keys),
            RequiredConfig::Reachable { base_url_key } => {
                self.is_reachable(provider, base_url_key).await
            }
        }
    }
}
