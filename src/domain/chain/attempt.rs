//! Attempt records and the aggregated chain execution result

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of a single invocation of one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptRecord {
    provider: String,
    success: bool,
    duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    timestamp: DateTime<Utc>,
}

impl AttemptRecord {
    pub fn succeeded(provider: impl Into<String>, duration: Duration) -> Self {
        Self {
            provider: provider.into(),
            success: true,
            duration_ms: duration.as_millis() as u64,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(provider: impl Into<String>, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            success: false,
            duration_ms: duration.as_millis() as u64,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Aggregated result of running a feature's provider chain.
///
/// `provider` and `result` are present iff `success`; `final_error` is present
/// iff not. `cancelled` marks a run cut short by shutdown.
#[derive(Debug, Clone, Serialize)]
pub struct ChainExecutionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    pub attempted_providers: Vec<String>,
    pub attempts: Vec<AttemptRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_error: Option<String>,
}

impl<T> ChainExecutionResult<T> {
    pub fn succeeded(
        provider: impl Into<String>,
        result: T,
        attempted_providers: Vec<String>,
        attempts: Vec<AttemptRecord>,
    ) -> Self {
        Self {
            success: true,
            cancelled: false,
            provider: Some(provider.into()),
            result: Some(result),
            attempted_providers,
            attempts,
            final_error: None,
        }
    }

    pub fn failed(
        final_error: impl Into<String>,
        attempted_providers: Vec<String>,
        attempts: Vec<AttemptRecord>,
    ) -> Self {
        Self {
            success: false,
            cancelled: false,
            provider: None,
            result: None,
            attempted_providers,
            attempts,
            final_error: Some(final_error.into()),
        }
    }

    /// Result for a chain in which no provider was available
    pub fn no_providers(feature: &str) -> Self {
        Self::failed(
            format!("No providers configured for feature '{}'", feature),
            Vec::new(),
            Vec::new(),
        )
    }

    /// Failed result for a run interrupted by shutdown
    pub fn cancelled(
        final_error: impl Into<String>,
        attempted_providers: Vec<String>,
        attempts: Vec<AttemptRecord>,
    ) -> Self {
        Self {
            cancelled: true,
            ..Self::failed(final_error, attempted_providers, attempts)
        }
    }

    /// True when nothing was attempted because nothing was available; a
    /// cancelled run is never reported as unconfigured
    pub fn is_unconfigured(&self) -> bool {
        !self.success && !self.cancelled && self.attempted_providers.is_empty()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_record_success() {
        let record = AttemptRecord::succeeded("fal", Duration::from_millis(120));
        assert!(record.success());
        assert_eq!(record.provider(), "fal");
        assert_eq!(record.duration_ms(), 120);
        assert!(record.error().is_none());
    }

    #[test]
    fn test_attempt_record_failure_carries_error() {
        let record = AttemptRecord::failed("fal", Duration::from_millis(5), "HTTP 500");
        assert!(!record.success());
        assert_eq!(record.error(), Some("HTTP 500"));
    }

    #[test]
    fn test_no_providers_result() {
        let result: ChainExecutionResult<()> = ChainExecutionResult::no_providers("images");
        assert!(!result.success);
        assert!(result.is_unconfigured());
        assert!(result.final_error.unwrap().contains("No providers configured"));
        assert!(result.attempts.is_empty());
    }

    #[test]
    fn test_result_serialization_omits_absent_fields() {
        let result = ChainExecutionResult::succeeded(
            "together",
            "image-url",
            vec!["together".to_string()],
            vec![AttemptRecord::succeeded("together", Duration::from_millis(3))],
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["provider"], "together");
        assert_eq!(json["result"], "image-url");
        assert!(json.get("final_error").is_none());
        assert!(json.get("cancelled").is_none());
        assert!(json["attempts"][0].get("error").is_none());
    }

    #[test]
    fn test_cancelled_before_any_attempt_is_not_unconfigured() {
        let result: ChainExecutionResult<()> =
            ChainExecutionResult::cancelled("Cancelled: shutdown", Vec::new(), Vec::new());

        assert!(!result.success);
        assert!(result.cancelled);
        assert!(!result.is_unconfigured());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["cancelled"], true);
    }
}
