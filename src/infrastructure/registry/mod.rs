//! Provider registry definitions loaded from TOML
//!
//! A registry file declares, per feature, the ordered provider chain plus the
//! HTTP endpoint each provider serves that feature on. A built-in definition
//! covers the generation features served out of the box.

mod builtin;
mod file;

pub use builtin::{builtin_registry, BUILTIN_REGISTRY_TOML};
pub use file::{
    load_registry, ChainEntry, EndpointDefinition, EndpointEntry, ProviderEntry,
    RegistryDefinition, RegistryFile, RegistryFileError,
};
