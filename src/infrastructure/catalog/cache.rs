//! TTL cache in front of a model catalog

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use crate::domain::{DomainError, ModelCatalog, ProviderDescriptor};

/// Model catalog wrapper caching each provider's model list for a fixed TTL.
///
/// Passed explicitly to whoever needs it; failed lookups are not cached.
#[derive(Debug)]
pub struct ModelCatalogCache<C: ModelCatalog> {
    inner: C,
    cache: Cache<String, Arc<Vec<String>>>,
}

impl<C: ModelCatalog> ModelCatalogCache<C> {
    pub fn new(inner: C, ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).max_capacity(256).build();

        Self { inner, cache }
    }

    /// Drop the cached list of one provider
    pub async fn invalidate(&self, provider: &ProviderDescriptor) {
        self.cache.invalidate(&cache_key(provider)).await;
    }

    /// Drop every cached list
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

/// One provider name can back several features with different declared models
fn cache_key(provider: &ProviderDescriptor) -> String {
    format!(
        "{}|{:?}|{}",
        provider.name(),
        provider.required_config(),
        provider.models().join(",")
    )
}

#[async_trait]
impl<C: ModelCatalog> ModelCatalog for ModelCatalogCache<C> {
    async fn list_models(&self, provider: &ProviderDescriptor) -> Result<Vec<String>, DomainError> {
        let models = self
            .cache
            .try_get_with(cache_key(provider), async {
                self.inner.list_models(provider).await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<DomainError>| (*e).clone())?;

        Ok(models.as_ref().clone())
    }
}
