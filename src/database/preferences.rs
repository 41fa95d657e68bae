//! Key-value preference storage.
//!
//! Values are JSON documents addressed by a string key. The settings engine
//! keeps the whole preferences object under a single key.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;

use super::connection::Database;
use crate::types::errors::SettingsError;

/// Persistent key-value storage for preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, SettingsError>;
    async fn set(&self, key: &str, value: &Value) -> Result<(), SettingsError>;
}

/// Preference store backed by the `preferences` table.
pub struct SqlitePreferenceStore {
    db: Mutex<Database>,
}

impl SqlitePreferenceStore {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, SettingsError> {
        Ok(Self::new(Database::open_in_memory()?))
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        let db = self
            .db
            .lock()
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        let raw: Option<String> = db
            .connection()
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        raw.map(|text| {
            serde_json::from_str(&text).map_err(|e| {
                SettingsError::Serialization(format!("Stored value for '{}' is not JSON: {}", key, e))
            })
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), SettingsError> {
        let text = serde_json::to_string(value)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        let db = self
            .db
            .lock()
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        db.connection().execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, text, now],
        )?;
        Ok(())
    }
}

/// Preference store that lives only as long as the process.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        let values = self
            .values
            .lock()
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), SettingsError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        values.insert(key.to_string(), value.clone());
        Ok(())
    }
}
