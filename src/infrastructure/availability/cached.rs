//! TTL cache in front of an availability checker

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use crate::domain::{AvailabilityChecker, ProviderDescriptor};

/// Availability checker wrapper that remembers results for a short TTL.
///
/// Concurrent checks for the same provider share one underlying probe, which
/// keeps bursts of requests from hammering a self-hosted backend.
#[derive(Debug)]
pub struct CachedAvailabilityChecker<C: AvailabilityChecker> {
    inner: C,
    cache: Cache<String, bool>,
}

impl<C: AvailabilityChecker> CachedAvailabilityChecker<C> {
    pub fn new(inner: C, ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).max_capacity(1_000).build();

        Self { inner, cache }
    }

    /// Forget every cached result
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Forget the cached result for one provider
    pub async fn invalidate(&self, provider: &ProviderDescriptor) {
        self.cache.invalidate(&cache_key(provider)).await;
    }
}

/// Keyed by the whole requirement so equally named providers with different
/// settings never share an entry
fn cache_key(provider: &ProviderDescriptor) -> String {
    format!(
        "{}|{:?}|{:?}",
        provider.name(),
        provider.required_config(),
        provider.health_check()
    )
}

#[async_trait]
impl<C: AvailabilityChecker> AvailabilityChecker for CachedAvailabilityChecker<C> {
    async fn check_availability(&self, provider: &ProviderDescriptor) -> bool {
        self.cache
            .get_with(cache_key(provider), self.inner.check_availability(provider))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::mock::StaticAvailabilityChecker;
    use crate::domain::RequiredConfig;

    fn provider(name: &str) -> ProviderDescriptor {
        ProviderDescriptor::new(name, RequiredConfig::reachable("GPU_WORKER_URL"))
    }

    #[tokio::test]
    async fn test_repeated_checks_hit_cache() {
        let checker =
            CachedAvailabilityChecker::new(StaticAvailabilityChecker::new(["gpu-worker"]), Duration::from_secs(60));

        assert!(checker.check_availability(&provider("gpu-worker")).await);
        assert!(checker.check_availability(&provider("gpu-worker")).await);
        assert!(!checker.check_availability(&provider("other")).await);

        assert_eq!(checker.inner.check_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_recheck() {
        let checker =
            CachedAvailabilityChecker::new(StaticAvailabilityChecker::new(["gpu-worker"]), Duration::from_secs(60));

        checker.check_availability(&provider("gpu-worker")).await;
        checker.invalidate(&provider("gpu-worker")).await;
        checker.check_availability(&provider("gpu-worker")).await;

        assert_eq!(checker.inner.check_count(), 2);
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let checker = CachedAvailabilityChecker::new(
            StaticAvailabilityChecker::new(["gpu-worker"]),
            Duration::from_millis(50),
        );

        checker.check_availability(&provider("gpu-worker")).await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        checker.check_availability(&provider("gpu-worker")).await;

        assert_eq!(checker.inner.check_count(), 2);
    }
}
