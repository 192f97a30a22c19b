//! Generic JSON-over-HTTP generation invoker

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{DomainError, GenerationInvoker, SettingsSource};
use crate::infrastructure::availability::probe_url;
use crate::infrastructure::http_client::HttpClientTrait;

/// Request forwarded to a provider: the feature plus an opaque JSON payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub feature: String,
    pub payload: Value,
}

impl GenerationRequest {
    pub fn new(feature: impl Into<String>, payload: Value) -> Self {
        Self {
            feature: feature.into(),
            payload,
        }
    }
}

/// Where the base URL of an endpoint comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointBase {
    /// Literal URL
    Url(String),
    /// Name of a setting holding the URL
    Setting(String),
}

/// HTTP endpoint serving one feature on one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpEndpoint {
    pub base: EndpointBase,
    pub path: String,
    /// Setting holding an API token, if the provider needs one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_key: Option<String>,
    /// Scheme prefixed to the token in the `authorization` header
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
}

fn default_auth_scheme() -> String {
    "Bearer".to_string()
}

impl HttpEndpoint {
    pub fn new(base: EndpointBase, path: impl Into<String>) -> Self {
        Self {
            base,
            path: path.into(),
            api_key_key: None,
            auth_scheme: default_auth_scheme(),
        }
    }

    pub fn with_api_key_key(mut self, key: impl Into<String>) -> Self {
        self.api_key_key = Some(key.into());
        self
    }

    pub fn with_auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_scheme = scheme.into();
        self
    }

    fn resolve_url(&self, provider: &str, settings: &dyn SettingsSource) -> Result<String, DomainError> {
        let base = match &self.base {
            EndpointBase::Url(url) => url.clone(),
            EndpointBase::Setting(key) => settings.get_non_empty(key).ok_or_else(|| {
                DomainError::provider(provider, format!("Setting '{}' is not set", key))
            })?,
        };

        Ok(probe_url(&base, &self.path))
    }
}

/// Posts the request payload as JSON to the endpoint registered for
/// `(feature, provider)` and returns the JSON response body.
#[derive(Debug)]
pub struct HttpGenerationInvoker {
    client: Arc<dyn HttpClientTrait>,
    settings: Arc<dyn SettingsSource>,
    endpoints: HashMap<(String, String), HttpEndpoint>,
}

impl HttpGenerationInvoker {
    pub fn new(client: Arc<dyn HttpClientTrait>, settings: Arc<dyn SettingsSource>) -> Self {
        Self {
            client,
            settings,
            endpoints: HashMap::new(),
        }
    }

    pub fn with_endpoint(
        mut self,
        feature: impl Into<String>,
        provider: impl Into<String>,
        endpoint: HttpEndpoint,
    ) -> Self {
        self.endpoints
            .insert((feature.into(), provider.into()), endpoint);
        self
    }

    pub fn endpoint(&self, feature: &str, provider: &str) -> Option<&HttpEndpoint> {
        self.endpoints
            .get(&(feature.to_string(), provider.to_string()))
    }
}

#[async_trait]
impl GenerationInvoker<GenerationRequest, Value> for HttpGenerationInvoker {
    async fn invoke(&self, provider: &str, request: &GenerationRequest) -> Result<Value, DomainError> {
        let endpoint = self.endpoint(&request.feature, provider).ok_or_else(|| {
            DomainError::provider(
                provider,
                format!("No endpoint configured for feature '{}'", request.feature),
            )
        })?;

        let url = endpoint.resolve_url(provider, self.settings.as_ref())?;

        let authorization = endpoint
            .api_key_key
            .as_deref()
            .and_then(|key| self.settings.get_non_empty(key))
            .map(|token| format!("{} {}", endpoint.auth_scheme, token));

        let mut headers = Vec::new();

        if let Some(value) = authorization.as_deref() {
            headers.push(("authorization", value));
        }

        debug!(provider = provider, feature = %request.feature, url = %url, "Invoking provider");

        self.client
            .post_json(&url, headers, &request.payload)
            .await
            .map_err(|e| match e {
                DomainError::Provider { message, .. } => DomainError::provider(provider, message),
                other => other,
            })
    }
}
