//! Availability seams - whether a provider is currently usable

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::{DomainError, HealthCheck, ProviderDescriptor};

/// Decides at call time whether a provider is configured and reachable.
///
/// Implementations never fail: every internal problem (missing setting,
/// network error, malformed response) resolves to `false`.
#[async_trait]
pub trait AvailabilityChecker: Send + Sync + Debug {
    async fn check_availability(&self, provider: &ProviderDescriptor) -> bool;
}

/// Network probe against a self-hosted backend
#[async_trait]
pub trait HealthProbe: Send + Sync + Debug {
    /// `Ok(())` only for an explicit success response
    async fn probe(&self, base_url: &str, check: &HealthCheck) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    /// Availability checker answering from a fixed set of provider names
    #[derive(Debug, Default)]
    pub struct StaticAvailabilityChecker {
        available: RwLock<HashSet<String>>,
        checks: AtomicUsize,
    }

    impl StaticAvailabilityChecker {
        pub fn new<I, S>(available: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                available: RwLock::new(available.into_iter().map(Into::into).collect()),
                checks: AtomicUsize::new(0),
            }
        }

        pub fn check_count(&self) -> usize {
            self.checks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AvailabilityChecker for StaticAvailabilityChecker {
        async fn check_availability(&self, provider: &ProviderDescriptor) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            self.available.read().unwrap().contains(provider.name())
        }
    }

    /// Health probe returning a fixed outcome and counting calls
    #[derive(Debug)]
    pub struct CountingHealthProbe {
        healthy: bool,
        calls: AtomicUsize,
    }

    impl CountingHealthProbe {
        pub fn new(healthy: bool) -> Self {
            Self {
                healthy,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HealthProbe for CountingHealthProbe {
        async fn probe(&self, base_url: &str, _check: &HealthCheck) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.healthy {
                Ok(())
            } else {
                Err(DomainError::provider(base_url, "unhealthy"))
            }
        }
    }
}
