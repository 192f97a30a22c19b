//! TOML registry files: validated DTOs and their conversion to domain types

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

use crate::domain::{
    ChainConfig, DomainError, HealthCheck, ProbeMethod, ProviderDescriptor, ProviderRegistry,
    RequiredConfig, DEFAULT_HEALTH_PATH, DEFAULT_PROBE_TIMEOUT_MS,
};
use crate::infrastructure::invoker::{EndpointBase, HttpEndpoint};
use crate::infrastructure::settings::MapSettings;

/// Error type for registry files
#[derive(Debug, Error)]
pub enum RegistryFileError {
    #[error("Failed to read registry file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid registry: {0}")]
    ValidationError(String),
}

impl From<validator::ValidationErrors> for RegistryFileError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::ValidationError(errors.to_string())
    }
}

impl From<RegistryFileError> for DomainError {
    fn from(error: RegistryFileError) -> Self {
        DomainError::configuration(error.to_string())
    }
}

/// Root of a registry file
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct RegistryFile {
    /// Fallback values for settings not present in the environment
    #[serde(default)]
    pub settings: HashMap<String, String>,

    #[serde(default)]
    #[validate(nested)]
    pub chains: Vec<ChainEntry>,

    #[serde(default)]
    #[validate(nested)]
    pub endpoints: Vec<EndpointEntry>,
}

/// One feature and its provider chain
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChainEntry {
    #[validate(length(min = 1, max = 50))]
    pub feature: String,

    #[validate(length(min = 1), nested)]
    pub providers: Vec<ProviderEntry>,
}

/// One provider within a chain
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProviderEntry {
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    /// Lower runs first; defaults to declaration order
    pub priority: Option<i32>,

    #[serde(default = "default_max_attempts")]
    #[validate(range(min = 1, max = 10))]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    #[validate(range(max = 60000))]
    pub backoff_base_ms: u64,

    /// Settings that must all be present (metered vendors)
    #[serde(default)]
    pub credentials: Vec<String>,

    /// Setting holding the base URL of a self-hosted backend
    pub base_url_key: Option<String>,

    #[validate(nested)]
    pub health_check: Option<HealthCheckEntry>,

    #[serde(default)]
    pub models: Vec<String>,
}

/// Health probe settings of a self-hosted provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HealthCheckEntry {
    #[serde(default = "default_health_path")]
    #[validate(length(min = 1))]
    pub path: String,

    #[serde(default)]
    pub method: ProbeMethod,

    #[serde(default = "default_probe_timeout_ms")]
    #[validate(range(min = 1, max = 60000))]
    pub timeout_ms: u64,

    #[serde(default)]
    pub success_statuses: Vec<u16>,
}

impl From<HealthCheckEntry> for HealthCheck {
    fn from(entry: HealthCheckEntry) -> Self {
        Self {
            path: entry.path,
            method: entry.method,
            timeout_ms: entry.timeout_ms,
            success_statuses: entry.success_statuses,
        }
    }
}

/// HTTP endpoint serving one feature on one provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EndpointEntry {
    #[validate(length(min = 1))]
    pub feature: String,

    #[validate(length(min = 1))]
    pub provider: String,

    /// Literal base URL
    pub url: Option<String>,

    /// Setting holding the base URL
    pub base_url_key: Option<String>,

    #[serde(default)]
    pub path: String,

    pub api_key_key: Option<String>,

    pub auth_scheme: Option<String>,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    500
}

fn default_health_path() -> String {
    DEFAULT_HEALTH_PATH.to_string()
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

/// Endpoint bound to a `(feature, provider)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDefinition {
    pub feature: String,
    pub provider: String,
    pub endpoint: HttpEndpoint,
}

/// Fully validated registry definition
#[derive(Debug, Clone)]
pub struct RegistryDefinition {
    pub registry: ProviderRegistry,
    pub endpoints: Vec<EndpointDefinition>,
    pub settings: MapSettings,
}

impl ProviderEntry {
    fn into_descriptor(self, index: usize, feature: &str) -> Result<ProviderDescriptor, RegistryFileError> {
        let required_config = match (self.credentials.is_empty(), self.base_url_key) {
            (false, None) => RequiredConfig::credentials(self.credentials),
            (true, Some(key)) => RequiredConfig::reachable(key),
            (true, None) => {
                return Err(RegistryFileError::ValidationError(format!(
                    "provider '{}' in chain '{}' needs either credentials or base_url_key",
                    self.name, feature
                )));
            }
            (false, Some(_)) => {
                return Err(RegistryFileError::ValidationError(format!(
                    "provider '{}' in chain '{}' sets both credentials and base_url_key",
                    self.name, feature
                )));
            }
        };

        if self.health_check.is_some() && !required_config.is_reachability_based() {
            return Err(RegistryFileError::ValidationError(format!(
                "provider '{}' in chain '{}' has a health_check but no base_url_key",
                self.name, feature
            )));
        }

        let mut descriptor = ProviderDescriptor::new(self.name, required_config)
            .with_priority(self.priority.unwrap_or(index as i32))
            .with_max_attempts(self.max_attempts)
            .with_backoff_base_ms(self.backoff_base_ms)
            .with_models(self.models);

        if let Some(check) = self.health_check {
            descriptor = descriptor.with_health_check(check.into());
        }

        Ok(descriptor)
    }
}

impl EndpointEntry {
    fn into_definition(self) -> Result<EndpointDefinition, RegistryFileError> {
        let base = match (self.url, self.base_url_key) {
            (Some(url), None) => EndpointBase::Url(url),
            (None, Some(key)) => EndpointBase::Setting(key),
            _ => {
                return Err(RegistryFileError::ValidationError(format!(
                    "endpoint for '{}' on '{}' needs exactly one of url or base_url_key",
                    self.feature, self.provider
                )));
            }
        };

        let mut endpoint = HttpEndpoint::new(base, self.path);

        if let Some(key) = self.api_key_key {
            endpoint = endpoint.with_api_key_key(key);
        }

        if let Some(scheme) = self.auth_scheme {
            endpoint = endpoint.with_auth_scheme(scheme);
        }

        Ok(EndpointDefinition {
            feature: self.feature,
            provider: self.provider,
            endpoint,
        })
    }
}

impl RegistryFile {
    /// Load a registry file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryFileError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading provider registry");

        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a registry from a TOML string
    pub fn from_str(content: &str) -> Result<Self, RegistryFileError> {
        let file: RegistryFile = toml::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    /// Build the domain registry, endpoints and fallback settings
    pub fn into_definition(self) -> Result<RegistryDefinition, DomainError> {
        let mut chains = Vec::with_capacity(self.chains.len());

        for chain in self.chains {
            let feature = chain.feature;
            let providers = chain
                .providers
                .into_iter()
                .enumerate()
                .map(|(index, entry)| entry.into_descriptor(index, &feature))
                .collect::<Result<Vec<_>, _>>()?;

            chains.push(ChainConfig::new(feature, providers)?);
        }

        let registry = ProviderRegistry::new(chains)?;

        let mut seen = HashSet::new();
        let mut endpoints = Vec::with_capacity(self.endpoints.len());

        for entry in self.endpoints {
            let definition = entry.into_definition()?;

            let known = registry
                .get_chain(&definition.feature)
                .map(|chain| chain.provider(&definition.provider).is_some())
                .unwrap_or(false);

            if !known {
                return Err(DomainError::configuration(format!(
                    "Endpoint references unknown provider '{}' for feature '{}'",
                    definition.provider, definition.feature
                )));
            }

            if !seen.insert((definition.feature.clone(), definition.provider.clone())) {
                return Err(DomainError::configuration(format!(
                    "Duplicate endpoint for provider '{}' on feature '{}'",
                    definition.provider, definition.feature
                )));
            }

            endpoints.push(definition);
        }

        debug!(
            features = registry.len(),
            endpoints = endpoints.len(),
            "Provider registry built"
        );

        Ok(RegistryDefinition {
            registry,
            endpoints,
            settings: MapSettings::from(self.settings),
        })
    }
}

/// Load and validate a registry file
pub fn load_registry(path: impl AsRef<Path>) -> Result<RegistryDefinition, DomainError> {
    RegistryFile::from_file(path)?.into_definition()
}
