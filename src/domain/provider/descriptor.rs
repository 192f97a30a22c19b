//! Provider descriptor and its declarative configuration requirements

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::chain::RetryPolicy;

/// Default hard timeout for a health probe
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;

/// Default health probe path for self-hosted backends
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// What must hold for a provider to be considered configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequiredConfig {
    /// Every named setting must be present and non-empty
    Credentials { keys: Vec<String> },
    /// The named setting holds the base URL of a backend that must answer its health probe
    Reachable { base_url_key: String },
}

impl RequiredConfig {
    pub fn credentials<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Credentials {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn reachable(base_url_key: impl Into<String>) -> Self {
        Self::Reachable {
            base_url_key: base_url_key.into(),
        }
    }

    pub fn is_reachability_based(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }
}

/// HTTP method used by a health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeMethod {
    #[default]
    Get,
    Head,
    Post,
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Head => write!(f, "HEAD"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Health probe descriptor for reachability-based providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    #[serde(default = "default_health_path")]
    pub path: String,
    #[serde(default)]
    pub method: ProbeMethod,
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
    /// Status codes treated as healthy; empty means any 2xx
    #[serde(default)]
    pub success_statuses: Vec<u16>,
}

fn default_health_path() -> String {
    DEFAULT_HEALTH_PATH.to_string()
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            path: default_health_path(),
            method: ProbeMethod::default(),
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            success_statuses: Vec::new(),
        }
    }
}

impl HealthCheck {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: ProbeMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    pub fn with_success_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.success_statuses = statuses;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Whether a response status counts as healthy
    pub fn is_success_status(&self, status: u16) -> bool {
        if self.success_statuses.is_empty() {
            (200..300).contains(&status)
        } else {
            self.success_statuses.contains(&status)
        }
    }
}

/// A single external backend registered for a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    name: String,
    priority: i32,
    required_config: RequiredConfig,
    max_attempts: u32,
    backoff_base_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    health_check: Option<HealthCheck>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    models: Vec<String>,
}

impl ProviderDescriptor {
    pub fn new(name: impl Into<String>, required_config: RequiredConfig) -> Self {
        Self {
            name: name.into(),
            priority: 0,
            required_config,
            max_attempts: 3,
            backoff_base_ms: 500,
            health_check: None,
            models: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_backoff_base_ms(mut self, ms: u64) -> Self {
        self.backoff_base_ms = ms;
        self
    }

    pub fn with_health_check(mut self, health_check: HealthCheck) -> Self {
        self.health_check = Some(health_check);
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    // Getters

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn required_config(&self) -> &RequiredConfig {
        &self.required_config
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_base_ms(&self) -> u64 {
        self.backoff_base_ms
    }

    pub fn health_check(&self) -> Option<&HealthCheck> {
        self.health_check.as_ref()
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Retry policy derived from this descriptor's retry budget
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.backoff_base_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let descriptor = ProviderDescriptor::new("fal", RequiredConfig::credentials(["FAL_KEY"]))
            .with_priority(1)
            .with_max_attempts(2)
            .with_backoff_base_ms(250)
            .with_models(["flux-dev"]);

        assert_eq!(descriptor.name(), "fal");
        assert_eq!(descriptor.priority(), 1);
        assert_eq!(descriptor.max_attempts(), 2);
        assert_eq!(descriptor.backoff_base_ms(), 250);
        assert_eq!(descriptor.models(), &["flux-dev".to_string()]);
        assert!(descriptor.health_check().is_none());

        let policy = descriptor.retry_policy();
        assert_eq!(policy.max_attempts(), 2);
        assert_eq!(policy.backoff_base_ms(), 250);
    }

    #[test]
    fn test_health_check_defaults() {
        let check = HealthCheck::default();
        assert_eq!(check.path, "/health");
        assert_eq!(check.method, ProbeMethod::Get);
        assert_eq!(check.timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_success_status_any_2xx_by_default() {
        let check = HealthCheck::default();
        assert!(check.is_success_status(200));
        assert!(check.is_success_status(204));
        assert!(!check.is_success_status(301));
        assert!(!check.is_success_status(503));
    }

    #[test]
    fn test_success_status_explicit_list() {
        let check = HealthCheck::new("/ping").with_success_statuses(vec![200, 418]);
        assert!(check.is_success_status(418));
        assert!(!check.is_success_status(204));
    }

    #[test]
    fn test_required_config_deserialization() {
        let config: RequiredConfig =
            serde_json::from_str(r#"{"type":"reachable","base_url_key":"GPU_WORKER_URL"}"#)
                .unwrap();
        assert_eq!(config, RequiredConfig::reachable("GPU_WORKER_URL"));
        assert!(config.is_reachability_based());
    }
}
