//! Settings source seam

use std::fmt::Debug;

/// Read-only source of process-wide settings (environment, config files).
///
/// This is the only external input used to decide whether a provider is
/// configured.
pub trait SettingsSource: Send + Sync + Debug {
    /// Raw value for a setting, if present
    fn get(&self, key: &str) -> Option<String>;

    /// Value for a setting, treating blank values as absent
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Whether a setting is present and non-blank
    fn is_set(&self, key: &str) -> bool {
        self.get_non_empty(key).is_some()
    }
}
