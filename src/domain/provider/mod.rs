//! Provider domain - descriptors, chains and the registry

mod chain;
mod descriptor;
mod registry;
mod settings;
mod validation;

pub use chain::ChainConfig;
pub use descriptor::{
    HealthCheck, ProbeMethod, ProviderDescriptor, RequiredConfig, DEFAULT_HEALTH_PATH,
    DEFAULT_PROBE_TIMEOUT_MS,
};
pub use registry::ProviderRegistry;
pub use settings::SettingsSource;
pub use validation::{validate_identifier, MAX_IDENTIFIER_LENGTH};
