//! Availability checking - settings evaluation, health probes and result caching

mod cached;
mod checker;
mod http_probe;

pub use cached::CachedAvailabilityChecker;
pub use checker::ConfiguredAvailabilityChecker;
pub use http_probe::{probe_url, HttpHealthProbe};
