//! Model catalog seam

use async_trait::async_trait;

use crate::domain::{DomainError, ProviderDescriptor};

#[cfg(test)]
use mockall::automock;

/// Lists the generation models a provider currently offers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    async fn list_models(&self, provider: &ProviderDescriptor) -> Result<Vec<String>, DomainError>;
}
