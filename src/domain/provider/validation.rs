//! Identifier validation for features and providers

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Maximum length for feature and provider identifiers
pub const MAX_IDENTIFIER_LENGTH: usize = 50;

/// Alphanumeric with inner hyphens or underscores
static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_-]*[a-zA-Z0-9]$|^[a-zA-Z0-9]$").expect("valid identifier regex")
});

/// Validate a feature or provider identifier.
///
/// `kind` is only used to build the error message ("feature", "provider").
pub fn validate_identifier(kind: &str, id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::validation(format!("{} name cannot be empty", kind)));
    }

    if id.len() > MAX_IDENTIFIER_LENGTH {
        return Err(DomainError::validation(format!(
            "{} name too long: {} characters (max {})",
            kind,
            id.len(),
            MAX_IDENTIFIER_LENGTH
        )));
    }

    if !IDENTIFIER_PATTERN.is_match(id) {
        return Err(DomainError::validation(format!(
            "Invalid {} name '{}': must be alphanumeric with hyphens or underscores, \
             cannot start or end with a separator",
            kind, id
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("provider", "fal").is_ok());
        assert!(validate_identifier("provider", "gpu-worker").is_ok());
        assert!(validate_identifier("feature", "text_to_speech").is_ok());
        assert!(validate_identifier("feature", "a").is_ok());
    }

    #[test]
    fn test_empty_identifier() {
        let err = validate_identifier("provider", "").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: provider name cannot be empty");
    }

    #[test]
    fn test_identifier_with_bad_edges() {
        assert!(validate_identifier("provider", "-fal").is_err());
        assert!(validate_identifier("provider", "fal-").is_err());
        assert!(validate_identifier("provider", "fal ai").is_err());
    }

    #[test]
    fn test_identifier_too_long() {
        let id = "x".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert!(validate_identifier("feature", &id).is_err());
    }
}
