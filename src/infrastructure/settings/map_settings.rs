//! In-memory and layered settings

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::SettingsSource;

/// Fixed in-memory settings, e.g. the `[settings]` table of a registry file
#[derive(Debug, Clone, Default)]
pub struct MapSettings {
    values: HashMap<String, String>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for MapSettings {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl SettingsSource for MapSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Settings resolved from several sources; the first non-blank value wins
#[derive(Debug, Clone, Default)]
pub struct LayeredSettings {
    layers: Vec<Arc<dyn SettingsSource>>,
}

impl LayeredSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lower-priority layer
    pub fn with_layer(mut self, layer: Arc<dyn SettingsSource>) -> Self {
        self.layers.push(layer);
        self
    }
}

impl SettingsSource for LayeredSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get_non_empty(key))
    }
}
