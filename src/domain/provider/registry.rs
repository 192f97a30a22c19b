//! Provider registry - read-only mapping from feature to provider chain

use std::collections::HashMap;

use super::ChainConfig;
use crate::domain::DomainError;

/// Static registry of provider chains keyed by feature name.
///
/// Built once at startup and never mutated, so it can be shared behind an
/// `Arc` and read concurrently without locks.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    chains: HashMap<String, ChainConfig>,
}

impl ProviderRegistry {
    /// Build a registry from a set of chains, rejecting duplicate features
    pub fn new(chains: impl IntoIterator<Item = ChainConfig>) -> Result<Self, DomainError> {
        let mut registry = Self::default();

        for chain in chains {
            registry.insert(chain)?;
        }

        Ok(registry)
    }

    fn insert(&mut self, chain: ChainConfig) -> Result<(), DomainError> {
        let feature = chain.feature().to_string();

        if self.chains.contains_key(&feature) {
            return Err(DomainError::configuration(format!(
                "Feature '{}' is registered more than once",
                feature
            )));
        }

        self.chains.insert(feature, chain);
        Ok(())
    }

    /// Resolve the chain for a feature.
    ///
    /// An unknown feature is a programming or configuration mistake and is the
    /// only failure the chain engine lets escape to its caller.
    pub fn get_chain(&self, feature: &str) -> Result<&ChainConfig, DomainError> {
        self.chains
            .get(feature)
            .ok_or_else(|| DomainError::unknown_feature(feature))
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.chains.contains_key(feature)
    }

    /// Registered feature names, sorted
    pub fn features(&self) -> Vec<&str> {
        let mut features: Vec<&str> = self.chains.keys().map(String::as_str).collect();
        features.sort_unstable();
        features
    }

    /// Registered chains, sorted by feature name
    pub fn chains(&self) -> Vec<&ChainConfig> {
        let mut chains: Vec<&ChainConfig> = self.chains.values().collect();
        chains.sort_by(|a, b| a.feature().cmp(b.feature()));
        chains
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProviderDescriptor, RequiredConfig};

    fn chain(feature: &str, providers: &[&str]) -> ChainConfig {
        ChainConfig::new(
            feature,
            providers
                .iter()
                .map(|name| ProviderDescriptor::new(*name, RequiredConfig::credentials(["KEY"])))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_get_registered_chain() {
        let registry = ProviderRegistry::new(vec![
            chain("image-generation", &["fal", "replicate"]),
            chain("text-to-speech", &["gpu-worker"]),
        ])
        .unwrap();

        let chain = registry.get_chain("image-generation").unwrap();
        assert_eq!(chain.provider_names(), vec!["fal", "replicate"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("text-to-speech"));
    }

    #[test]
    fn test_unknown_feature_is_config_error() {
        let registry = ProviderRegistry::new(vec![chain("image-generation", &["fal"])]).unwrap();

        let err = registry.get_chain("video-generation").unwrap_err();
        assert!(matches!(err, DomainError::UnknownFeature { ref feature } if feature == "video-generation"));
    }

    #[test]
    fn test_duplicate_feature_rejected() {
        let result = ProviderRegistry::new(vec![
            chain("image-generation", &["fal"]),
            chain("image-generation", &["replicate"]),
        ]);

        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn test_features_sorted() {
        let registry = ProviderRegistry::new(vec![
            chain("text-to-speech", &["gpu-worker"]),
            chain("image-generation", &["fal"]),
        ])
        .unwrap();

        assert_eq!(registry.features(), vec!["image-generation", "text-to-speech"]);
        assert_eq!(registry.chains()[0].feature(), "image-generation");
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProviderRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.get_chain("anything").is_err());
    }
}
