//! HTTP health probe for self-hosted generation backends

use async_trait::async_trait;
use reqwest::Method;

use crate::domain::{DomainError, HealthCheck, HealthProbe, ProbeMethod};

/// Health probe issuing a single HTTP request with a hard per-request timeout
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: reqwest::Client,
}

impl HttpHealthProbe {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpHealthProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Join a base URL and a probe path without doubling slashes
pub fn probe_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');

    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

fn to_reqwest_method(method: ProbeMethod) -> Method {
    match method {
        ProbeMethod::Get => Method::GET,
        ProbeMethod::Head => Method::HEAD,
        ProbeMethod::Post => Method::POST,
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, base_url: &str, check: &HealthCheck) -> Result<(), DomainError> {
        let url = probe_url(base_url, &check.path);

        let response = self
            .client
            .request(to_reqwest_method(check.method), &url)
            .timeout(check.timeout())
            .send()
            .await
            .map_err(|e| DomainError::provider(base_url, format!("Health probe failed: {}", e)))?;

        let status = response.status().as_u16();

        if check.is_success_status(status) {
            Ok(())
        } else {
            Err(DomainError::provider(
                base_url,
                format!("Health probe {} {} returned HTTP {}", check.method, url, status),
            ))
        }
    }
}
