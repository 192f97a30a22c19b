//! Chain configuration: the ordered providers registered for a feature

use std::collections::HashSet;

use serde::Serialize;

use super::validation::validate_identifier;
use super::ProviderDescriptor;
use crate::domain::DomainError;

/// Ordered provider chain for a single feature.
///
/// Always non-empty, free of duplicate provider names and sorted ascending by
/// priority. Providers sharing a priority keep their registration order.
#[derive(Debug, Clone, Serialize)]
pub struct ChainConfig {
    feature: String,
    providers: Vec<ProviderDescriptor>,
}

impl ChainConfig {
    pub fn new(
        feature: impl Into<String>,
        mut providers: Vec<ProviderDescriptor>,
    ) -> Result<Self, DomainError> {
        let feature = feature.into();
        validate_identifier("feature", &feature).map_err(into_configuration)?;

        if providers.is_empty() {
            return Err(DomainError::configuration(format!(
                "Chain for feature '{}' has no providers",
                feature
            )));
        }

        let mut seen = HashSet::new();

        for provider in &providers {
            validate_identifier("provider", provider.name()).map_err(into_configuration)?;

            if !seen.insert(provider.name().to_string()) {
                return Err(DomainError::configuration(format!(
                    "Duplicate provider '{}' in chain for feature '{}'",
                    provider.name(),
                    feature
                )));
            }

            if provider.max_attempts() == 0 {
                return Err(DomainError::configuration(format!(
                    "Provider '{}' in chain for feature '{}' must allow at least one attempt",
                    provider.name(),
                    feature
                )));
            }
        }

        // sort_by_key is stable
        providers.sort_by_key(|p| p.priority());

        Ok(Self { feature, providers })
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn providers(&self) -> &[ProviderDescriptor] {
        &self.providers
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|p| p.name() == name)
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Always false for a constructed chain
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

fn into_configuration(err: DomainError) -> DomainError {
    match err {
        DomainError::Validation { message } => DomainError::configuration(message),
        other => other,
    }
}
