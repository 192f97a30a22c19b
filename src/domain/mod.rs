//! Domain layer - provider registry, availability seams and the chain engine

pub mod availability;
pub mod catalog;
pub mod chain;
pub mod error;
pub mod provider;

pub use availability::{AvailabilityChecker, HealthProbe};
pub use catalog::ModelCatalog;
pub use chain::{
    invoker_fn, AttemptRecord, ChainExecutionResult, ChainExecutor, GenerationInvoker,
    ProviderStatus, RetryPolicy, ShutdownController, ShutdownSignal,
};
pub use error::DomainError;
pub use provider::{
    ChainConfig, HealthCheck, ProbeMethod, ProviderDescriptor, ProviderRegistry, RequiredConfig,
    SettingsSource, DEFAULT_HEALTH_PATH, DEFAULT_PROBE_TIMEOUT_MS,
};
