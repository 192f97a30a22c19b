//! Model catalog backed by self-hosted backends

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DomainError, ModelCatalog, ProviderDescriptor, RequiredConfig, SettingsSource};
use crate::infrastructure::availability::probe_url;
use crate::infrastructure::http_client::HttpClientTrait;

/// Path queried on self-hosted backends for their model list
pub const DEFAULT_MODELS_PATH: &str = "/models";

/// Model catalog asking self-hosted backends for their models and falling back
/// to the models declared on the descriptor
#[derive(Debug)]
pub struct HttpModelCatalog {
    client: Arc<dyn HttpClientTrait>,
    settings: Arc<dyn SettingsSource>,
    models_path: String,
}

impl HttpModelCatalog {
    pub fn new(client: Arc<dyn HttpClientTrait>, settings: Arc<dyn SettingsSource>) -> Self {
        Self {
            client,
            settings,
            models_path: DEFAULT_MODELS_PATH.to_string(),
        }
    }

    pub fn with_models_path(mut self, path: impl Into<String>) -> Self {
        self.models_path = path.into();
        self
    }
}

/// Accepts `["a", "b"]`, `{"models": [...]}` and entries shaped `{"id": ..}` or `{"name": ..}`
fn parse_models(body: &Value) -> Option<Vec<String>> {
    let entries = match body {
        Value::Array(entries) => entries,
        Value::Object(map) => map.get("models")?.as_array()?,
        _ => return None,
    };

    Some(
        entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(name.clone()),
                Value::Object(map) => map
                    .get("id")
                    .or_else(|| map.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect(),
    )
}

#[async_trait]
impl ModelCatalog for HttpModelCatalog {
    async fn list_models(&self, provider: &ProviderDescriptor) -> Result<Vec<String>, DomainError> {
        let RequiredConfig::Reachable { base_url_key } = provider.required_config() else {
            return Ok(provider.models().to_vec());
        };

        let Some(base_url) = self.settings.get_non_empty(base_url_key) else {
            return Ok(provider.models().to_vec());
        };

        let body = self
            .client
            .get_json(&probe_url(&base_url, &self.models_path), vec![])
            .await
            .map_err(|e| match e {
                DomainError::Provider { message, .. } => {
                    DomainError::provider(provider.name(), message)
                }
                other => other,
            })?;

        parse_models(&body).ok_or_else(|| {
            DomainError::provider(provider.name(), "Unrecognized model list response")
        })
    }
}
