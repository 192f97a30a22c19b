//! Domain error taxonomy

use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Configuration error: unknown feature '{feature}'")]
    UnknownFeature { feature: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Cancelled: {message}")]
    Cancelled { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn unknown_feature(feature: impl Into<String>) -> Self {
        Self::UnknownFeature {
            feature: feature.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error stems from registry or descriptor configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownFeature { .. } | Self::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_feature_error() {
        let error = DomainError::unknown_feature("music-generation");
        assert_eq!(
            error.to_string(),
            "Configuration error: unknown feature 'music-generation'"
        );
        assert!(error.is_configuration());
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("fal", "HTTP 502");
        assert_eq!(error.to_string(), "Provider error: fal - HTTP 502");
        assert!(!error.is_configuration());
    }

    #[test]
    fn test_cancelled_error() {
        let error = DomainError::cancelled("shutdown after attempting: fal");
        assert_eq!(error.to_string(), "Cancelled: shutdown after attempting: fal");
        assert!(!error.is_configuration());
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("max_attempts must be at least 1");
        assert_eq!(
            error.to_string(),
            "Validation error: max_attempts must be at least 1"
        );
    }
}
