//! Process environment settings

use std::env;

use crate::domain::SettingsSource;

/// Settings read from the process environment.
///
/// Values loaded from a `.env` file by `dotenvy` at startup are visible here
/// like any other environment variable.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    prefix: Option<String>,
}

impl EnvSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every key before lookup
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn var_name(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, key),
            None => key.to_string(),
        }
    }
}

impl SettingsSource for EnvSettings {
    fn get(&self, key: &str) -> Option<String> {
        env::var(self.var_name(key)).ok()
    }
}
