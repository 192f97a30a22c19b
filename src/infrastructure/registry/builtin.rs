//! Built-in provider registry

use super::file::{RegistryDefinition, RegistryFile};
use crate::domain::DomainError;

/// Registry used when no registry file is configured
pub const BUILTIN_REGISTRY_TOML: &str = include_str!("builtin.toml");

/// Parse the built-in registry definition
pub fn builtin_registry() -> Result<RegistryDefinition, DomainError> {
    RegistryFile::from_str(BUILTIN_REGISTRY_TOML)?.into_definition()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_valid() {
        let definition = builtin_registry().unwrap();

        assert_eq!(
            definition.registry.features(),
            vec![
                "image-generation",
                "sound-effects",
                "speech-to-text",
                "text-to-speech",
                "voice-cloning",
                "voice-isolation",
            ]
        );
        assert!(definition.settings.is_empty());
    }

    #[test]
    fn test_image_generation_chain_order() {
        let definition = builtin_registry().unwrap();
        let chain = definition.registry.get_chain("image-generation").unwrap();

        assert_eq!(chain.provider_names(), vec!["fal", "replicate", "together"]);
        assert!(chain
            .providers()
            .iter()
            .all(|p| !p.required_config().is_reachability_based()));
    }

    #[test]
    fn test_self_hosted_features_probe_gpu_worker() {
        let definition = builtin_registry().unwrap();

        for feature in ["text-to-speech", "speech-to-text", "sound-effects"] {
            let chain = definition.registry.get_chain(feature).unwrap();
            let worker = chain.provider("gpu-worker").unwrap();

            assert!(worker.required_config().is_reachability_based());
            assert_eq!(worker.health_check().unwrap().path, "/health");
            assert_eq!(worker.max_attempts(), 2);
        }
    }

    #[test]
    fn test_every_provider_has_an_endpoint() {
        let definition = builtin_registry().unwrap();

        for chain in definition.registry.chains() {
            for provider in chain.providers() {
                assert!(
                    definition
                        .endpoints
                        .iter()
                        .any(|e| e.feature == chain.feature() && e.provider == provider.name()),
                    "no endpoint for {} on {}",
                    provider.name(),
                    chain.feature()
                );
            }
        }
    }
}
