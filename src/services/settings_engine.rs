// Tab deduplication settings engine
// Loads preferences over the built-in defaults, applies single-field updates,
// and persists the whole preferences object through a PreferenceStore.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::database::preferences::PreferenceStore;
use crate::types::errors::SettingsError;
use crate::types::settings::{Settings, STORAGE_KEY};

/// Returns `settings` with the field named `key` (wire name) set to `value`.
///
/// Unknown keys are rejected with `InvalidKey`; values that do not fit the
/// field's type with `InvalidValue`.
pub fn apply_value(settings: &Settings, key: &str, value: Value) -> Result<Settings, SettingsError> {
    if key.is_empty() {
        return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
    }
    if !Settings::KEYS.contains(&key) {
        return Err(SettingsError::InvalidKey(format!(
            "Key '{}' not found in settings",
            key
        )));
    }

    let mut json_value = serde_json::to_value(settings).map_err(|e| {
        SettingsError::Serialization(format!("Failed to serialize settings: {}", e))
    })?;
    if let Value::Object(map) = &mut json_value {
        map.insert(key.to_string(), value);
    }

    // Deserialize back into Settings to validate the new value
    serde_json::from_value(json_value).map_err(|e| {
        SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
    })
}

/// Settings engine holding the current preferences in memory.
pub struct SettingsEngine {
    store: Arc<dyn PreferenceStore>,
    settings: Settings,
}

impl SettingsEngine {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            settings: Settings::default(),
        }
    }

    /// Reads stored preferences merged over the defaults.
    ///
    /// Never fails: storage errors degrade to defaults and are logged.
    pub async fn load_settings(&self) -> Settings {
        match self.store.get(STORAGE_KEY).await {
            Ok(Some(stored)) => Settings::from_stored(&stored),
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!(error = %e, "preference storage read failed, using defaults");
                Settings::default()
            }
        }
    }

    /// Loads preferences and makes them the current in-memory settings.
    pub async fn load(&mut self) -> Settings {
        self.settings = self.load_settings().await;
        self.settings.clone()
    }

    /// Persists `settings` as the stored preferences object.
    pub async fn save_settings(&self, settings: &Settings) -> Result<(), SettingsError> {
        let value = serde_json::to_value(settings).map_err(|e| {
            SettingsError::Serialization(format!("Failed to serialize settings: {}", e))
        })?;
        self.store.set(STORAGE_KEY, &value).await
    }

    /// Persists the current in-memory settings.
    pub async fn save(&self) -> Result<(), SettingsError> {
        self.save_settings(&self.settings).await
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Updates one field and persists the result.
    ///
    /// A rejected key or value leaves the settings untouched. Once the value is
    /// accepted the in-memory settings keep it even if persisting fails.
    pub async fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.settings = apply_value(&self.settings, key, value)?;
        self.save().await
    }

    /// Resets to the built-in defaults and persists them.
    pub async fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = Settings::default();
        self.save().await
    }
}
